pub mod header;
pub mod tx;

use ufo_hashes::DoubleSha256;

/// Extensions for streaming the legacy wire encoding into a hasher.
pub(crate) trait HasherExtensions {
    fn write_i32_le(&mut self, value: i32) -> &mut Self;
    fn write_u32_le(&mut self, value: u32) -> &mut Self;
    fn write_u64_le(&mut self, value: u64) -> &mut Self;
    /// Writes a compact-size length marker.
    fn write_var_int(&mut self, value: u64) -> &mut Self;
    /// Writes a length-prefixed byte slice.
    fn write_var_bytes(&mut self, bytes: &[u8]) -> &mut Self;
}

impl HasherExtensions for DoubleSha256 {
    fn write_i32_le(&mut self, value: i32) -> &mut Self {
        self.update(value.to_le_bytes())
    }

    fn write_u32_le(&mut self, value: u32) -> &mut Self {
        self.update(value.to_le_bytes())
    }

    fn write_u64_le(&mut self, value: u64) -> &mut Self {
        self.update(value.to_le_bytes())
    }

    fn write_var_int(&mut self, value: u64) -> &mut Self {
        if value < 0xfd {
            self.update([value as u8])
        } else if value <= 0xffff {
            self.update([0xfd]).update((value as u16).to_le_bytes())
        } else if value <= 0xffff_ffff {
            self.update([0xfe]).update((value as u32).to_le_bytes())
        } else {
            self.update([0xff]).update(value.to_le_bytes())
        }
    }

    fn write_var_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.write_var_int(bytes.len() as u64).update(bytes)
    }
}
