use std::net::Ipv4Addr;

use tracing::{debug, info};

use crate::config::TestCase;
use crate::error::Result;
use crate::ip::{IpHeader, IPPROTO_IGMP, ROUTER_ALERT};
use crate::net::lookup_interface;
use crate::socket::Sender;
use crate::utils::{checksum, sum_byte_arr};

pub const MEMBERSHIP_QUERY: u8 = 0x11;

/// Max response code of 2.0 seconds, the usual packet tool default.
const DEFAULT_MAX_RESP_CODE: u8 = 20;

#[derive(Debug, Clone)]
pub struct Igmp {
    pub r#type: u8,
    max_resp_code: u8,
    check_sum: [u8; 2],
    group_addr: Ipv4Addr,
}

impl Igmp {
    pub fn new(r#type: u8) -> Self {
        let mut igmp = Self {
            r#type,
            max_resp_code: DEFAULT_MAX_RESP_CODE,
            check_sum: [0x00, 0x00],
            group_addr: Ipv4Addr::UNSPECIFIED,
        };

        igmp.check_sum = checksum(sum_byte_arr(&igmp.to_byte_array()));
        igmp
    }

    pub fn to_byte_array(&self) -> Vec<u8> {
        let mut byte = vec![self.r#type, self.max_resp_code];
        byte.extend_from_slice(&self.check_sum);
        byte.extend_from_slice(&self.group_addr.octets());
        byte
    }
}

/// IP(src=dst=`addr`, Router Alert) carrying an IGMP membership query.
pub fn build_packet(addr: Ipv4Addr) -> Vec<u8> {
    let igmp = Igmp::new(MEMBERSHIP_QUERY);
    let payload = igmp.to_byte_array();

    let mut header = IpHeader::new(addr, addr, IPPROTO_IGMP).with_options(&ROUTER_ALERT);
    header.finalize(payload.len());

    let mut packet = header.to_byte_array();
    packet.extend_from_slice(&payload);
    packet
}

pub fn send_igmp(case: &TestCase) -> Result<()> {
    let packet = build_packet(case.address);
    debug!(?packet);

    let ni = lookup_interface(&case.interface)?;
    let sender = Sender::open(&ni.name)?;
    let sent = sender.send(&packet, case.address)?;
    info!(
        case = %case.index,
        interface = %ni.name,
        ifindex = ni.ifindex,
        address = %case.address,
        sent,
        "igmp packet sent"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_query_bytes() {
        let igmp = Igmp::new(MEMBERSHIP_QUERY);
        // ~(0x1114) = 0xeeeb
        assert_eq!(
            igmp.to_byte_array(),
            vec![0x11, 0x14, 0xee, 0xeb, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn router_alert_query_packet() {
        let addr = Ipv4Addr::new(10, 0, 0, 1);
        let packet = build_packet(addr);

        assert_eq!(packet.len(), 32);
        assert_eq!(packet[0], 0x46);
        assert_eq!(u16::from_be_bytes([packet[2], packet[3]]), 32);
        assert_eq!(packet[9], IPPROTO_IGMP);
        assert_eq!(&packet[12..16], &addr.octets());
        assert_eq!(&packet[16..20], &addr.octets());
        assert_eq!(&packet[20..24], &[0x94, 0x04, 0x00, 0x00]);
        assert_eq!(packet[24], 0x11);
        assert_eq!(&packet[28..32], &[0, 0, 0, 0]);

        assert_eq!(checksum(sum_byte_arr(&packet[..24])), [0x00, 0x00]);
        assert_eq!(checksum(sum_byte_arr(&packet[24..])), [0x00, 0x00]);
    }

    #[test]
    fn reference_wire_bytes() {
        let packet = build_packet(Ipv4Addr::new(10, 0, 0, 1));
        let expected: [u8; 32] = [
            0x46, 0x00, 0x00, 0x20, 0x00, 0x01, 0x00, 0x00, 0x40, 0x02, 0xd1, 0xd5, 0x0a, 0x00,
            0x00, 0x01, 0x0a, 0x00, 0x00, 0x01, 0x94, 0x04, 0x00, 0x00, 0x11, 0x14, 0xee, 0xeb,
            0x00, 0x00, 0x00, 0x00,
        ];
        assert_eq!(packet, expected);
    }
}
