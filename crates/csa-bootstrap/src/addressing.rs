//! Address pools for the fixed control and device subnets.

use std::net::Ipv4Addr;

pub const CONTROL_NET_ID: &str = "control_net";
pub const CONTROL_SUBNET: &str = "192.168.1.0/24";
pub const DEVICE_NET_ID: &str = "device_net";
pub const DEVICE_SUBNET: &str = "192.168.2.0/24";

pub const SWITCH_ADDRESS: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 1);
pub const SCADA_ADDRESS: Ipv4Addr = Ipv4Addr::new(192, 168, 2, 10);

const LAST_HOST: u8 = 254;

/// Monotonic host allocator on a /24. Addresses are never handed out twice.
///
/// Once the last host is gone, further requests are counted as misses
/// instead of failing.
#[derive(Debug, Clone)]
pub struct AddressPool {
    name: &'static str,
    subnet: &'static str,
    prefix: [u8; 3],
    next: Option<u8>,
    misses: u32,
}

impl AddressPool {
    pub fn new(name: &'static str, subnet: &'static str, prefix: [u8; 3], first_host: u8) -> Self {
        Self {
            name,
            subnet,
            prefix,
            next: (first_host <= LAST_HOST).then_some(first_host),
            misses: 0,
        }
    }

    /// Controllers: `192.168.1.10` upwards.
    pub fn controllers() -> Self {
        Self::new("controllers", CONTROL_SUBNET, [192, 168, 1], 10)
    }

    /// Field devices: `192.168.2.100` upwards.
    pub fn field_devices() -> Self {
        Self::new("field devices", DEVICE_SUBNET, [192, 168, 2], 100)
    }

    /// Next free host, or `None` once the pool is spent.
    pub fn allocate(&mut self) -> Option<Ipv4Addr> {
        let Some(host) = self.next else {
            self.misses += 1;
            return None;
        };
        self.next = host.checked_add(1).filter(|h| *h <= LAST_HOST);
        let [a, b, c] = self.prefix;
        Some(Ipv4Addr::new(a, b, c, host))
    }

    /// Requests made after the pool ran out.
    pub fn misses(&self) -> u32 {
        self.misses
    }

    /// Review warning for a spent pool, `None` when every request was served.
    pub fn exhaustion_warning(&self) -> Option<String> {
        (self.misses > 0).then(|| {
            format!(
                "Address pool '{}' exhausted on {}; {} node(s) left without an address",
                self.name, self.subnet, self.misses
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pools_start_at_documented_hosts() {
        assert_eq!(
            AddressPool::controllers().allocate(),
            Some(Ipv4Addr::new(192, 168, 1, 10))
        );
        assert_eq!(
            AddressPool::field_devices().allocate(),
            Some(Ipv4Addr::new(192, 168, 2, 100))
        );
    }

    #[test]
    fn exhausted_pool_counts_misses() {
        let mut pool = AddressPool::new("test", "10.0.0.0/24", [10, 0, 0], 253);
        assert_eq!(pool.allocate().unwrap().octets()[3], 253);
        assert_eq!(pool.allocate().unwrap().octets()[3], 254);
        assert!(pool.exhaustion_warning().is_none());

        assert_eq!(pool.allocate(), None);
        assert_eq!(pool.allocate(), None);
        assert_eq!(pool.misses(), 2);

        let warning = pool.exhaustion_warning().unwrap();
        assert!(warning.contains("'test'"));
        assert!(warning.contains("10.0.0.0/24"));
        assert!(warning.contains("2 node(s)"));
    }

    #[test]
    fn fixed_addresses_sit_outside_the_pools() {
        let mut devices = AddressPool::field_devices();
        for _ in 0..155 {
            assert_ne!(devices.allocate(), Some(SCADA_ADDRESS));
        }
        assert!(devices.allocate().is_none());
        assert_ne!(AddressPool::controllers().allocate(), Some(SWITCH_ADDRESS));
    }
}
