pub fn sum_byte_arr(arr: &[u8]) -> usize {
    let mut sum = 0;
    for i in arr.chunks(2) {
        let word = match i {
            [a, b] => ((*a as usize) << 8) | *b as usize,
            [a] => (*a as usize) << 8,
            _ => unreachable!(),
        };
        sum += word;
    }
    sum
}

pub fn checksum(mut sum: usize) -> [u8; 2] {
    while sum >> 16 != 0 {
        sum = (sum & 0xffff) + (sum >> 16);
    }
    ((sum ^ 0xffff) as u16).to_be_bytes()
}
