#[derive(Debug, Default)]
/// Calculate CRC-8 used in 1-Wire communications.
pub struct OneWireCrc(u8);

#[cfg(feature = "crc-table")]
const CRC_TABLE: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = crc_bitwise(0, i as u8);
        i += 1;
    }
    table
};

const fn crc_bitwise(crc: u8, byte: u8) -> u8 {
    let mut crc = crc ^ byte;
    let mut bit = 0;
    while bit < 8 {
        crc = if crc & 0x1 == 0x1 {
            (crc >> 1) ^ 0x8c
        } else {
            crc >> 1
        };
        bit += 1;
    }
    crc
}

impl OneWireCrc {
    /// Get the current CRC value
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Update the CRC with the incoming byte.
    pub fn update(&mut self, byte: u8) {
        #[cfg(feature = "crc-table")]
        {
            self.0 = CRC_TABLE[(self.0 ^ byte) as usize];
        }
        #[cfg(not(feature = "crc-table"))]
        {
            self.0 = crc_bitwise(self.0, byte);
        }
    }

    /// Compute the CRC of a byte sequence.
    pub fn compute(bytes: &[u8]) -> u8 {
        let mut crc = OneWireCrc::default();
        bytes.iter().for_each(|&b| crc.update(b));
        crc.value()
    }

    /// Validate a sequence of bytes where the last byte is the 1-Wire CRC of
    /// the previous bytes.
    pub fn validate(sequence: &[u8]) -> bool {
        !sequence.is_empty() && Self::compute(sequence) == 0
    }
}
