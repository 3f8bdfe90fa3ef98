#[allow(non_upper_case_globals)]
pub const NETWORK_PROTOCOL_IPv4 : u16 = 0x0800;
#[allow(non_upper_case_globals)]
pub const NETWORK_PROTOCOL_IPv6 : u16 = 0x86DD;
pub const NETWORK_PROTOCOL_ARP  : u16 = 0x0806;

pub const TRANSPORT_PROTOCOL_ICMP : u8 = 0x01;
pub const TRANSPORT_PROTOCOL_TCP  : u8 = 0x06;
pub const TRANSPORT_PROTOCOL_UDP  : u8 = 0x11;

/// Filter used when the user asks for `all` traffic or gives no filter.
pub const ANY_PACKET_FILTER: &str = "udp or tcp or icmp";


#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct MacAddress {
    data: [u8; 6]
}


impl MacAddress {
    pub const SIZE: usize = 6;

    pub fn from_bytes(data: [u8; 6]) -> Self {
        Self { data }
    }

    pub fn octets(&self) -> [u8; 6] {
        self.data
    }
}


impl std::fmt::Display for MacAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let [a, b, c, d, e, g] = self.data;
        write!(f, "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}", a, b, c, d, e, g)
    }
}

impl std::fmt::Debug for MacAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}
