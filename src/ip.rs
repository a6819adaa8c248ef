use std::net::Ipv4Addr;

use crate::utils::{checksum, sum_byte_arr};

const IPV4_MIN_HEADER_LEN: usize = 20;

/// Router Alert option: type 0x94, length 4, value 0.
pub const ROUTER_ALERT: [u8; 4] = [0x94, 0x04, 0x00, 0x00];

pub const IPPROTO_IGMP: u8 = 0x02;

#[derive(Clone, Debug)]
pub struct IpHeader {
    service_type: u8,
    pub total_packet_length: [u8; 2],
    packet_identification: [u8; 2],
    flags: [u8; 2],
    ttl: u8,
    pub protocol: u8,
    pub check_sum: [u8; 2],
    pub source_ip_addr: [u8; 4],
    pub dst_ip_addr: [u8; 4],
    options: Vec<u8>,
}

impl IpHeader {
    pub fn new(source_ip: Ipv4Addr, dst_ip: Ipv4Addr, protocol: u8) -> Self {
        Self {
            service_type: 0x00,
            total_packet_length: [0x00, 0x00],
            packet_identification: [0x00, 0x01],
            flags: [0x00, 0x00],
            ttl: 0x40,
            check_sum: [0x00, 0x00],
            source_ip_addr: source_ip.octets(),
            dst_ip_addr: dst_ip.octets(),
            protocol,
            options: vec![],
        }
    }

    /// Options are written as given; `to_byte_array` pads them with EOL to a 32-bit boundary.
    pub fn with_options(mut self, options: &[u8]) -> Self {
        self.options = options.to_vec();
        self
    }

    pub fn header_length(&self) -> usize {
        IPV4_MIN_HEADER_LEN + (self.options.len() + 3) / 4 * 4
    }

    /// Fills in total length and header checksum for a payload of `payload_len` bytes.
    pub fn finalize(&mut self, payload_len: usize) {
        self.total_packet_length = ((self.header_length() + payload_len) as u16).to_be_bytes();
        self.check_sum = [0x00, 0x00];
        self.check_sum = checksum(sum_byte_arr(&self.to_byte_array()));
    }

    pub fn to_byte_array(&self) -> Vec<u8> {
        let ihl = (self.header_length() / 4) as u8;
        let mut byte = vec![];
        byte.push(0x40 | ihl);
        byte.push(self.service_type);
        byte.extend_from_slice(&self.total_packet_length);
        byte.extend_from_slice(&self.packet_identification);
        byte.extend_from_slice(&self.flags);
        byte.push(self.ttl);
        byte.push(self.protocol);
        byte.extend_from_slice(&self.check_sum);
        byte.extend_from_slice(&self.source_ip_addr);
        byte.extend_from_slice(&self.dst_ip_addr);
        byte.extend_from_slice(&self.options);
        byte.resize(self.header_length(), 0x00);
        byte
    }
}
