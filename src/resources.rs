use crate::{
    definitions::{cpu, memory},
    RomError,
};

/// The amount of bytes a rom may have, everything from the program start up
/// to the end of memory.
pub const MAX_ROM_SIZE: usize = memory::SIZE - cpu::PROGRAM_COUNTER;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents a single rom with it's information. Reading the file is up to
/// the host, the rom only holds the raw bytes.
pub struct Rom {
    /// The rom name
    name: String,
    /// The raw program, written verbatim to `0x200`
    data: Box<[u8]>,
}

impl Rom {
    /// Will generate a new rom based of the given data, the data has to fit
    /// into memory behind the program start.
    ///
    /// # Example
    /// ```rust
    /// # use chip::resources::*;
    /// let rom = Rom::new("JUMP", vec![0x12, 0x00]).unwrap();
    /// assert_eq!(rom.get_data(), &[0x12, 0x00]);
    /// assert!(Rom::new("BIG", vec![0; MAX_ROM_SIZE + 1]).is_err());
    /// ```
    pub fn new<D: Into<Box<[u8]>>>(name: &str, data: D) -> Result<Self, RomError> {
        let data = data.into();
        if data.len() > MAX_ROM_SIZE {
            return Err(RomError::TooLarge {
                name: name.to_string(),
                len: data.len(),
                max: MAX_ROM_SIZE,
            });
        }
        Ok(Rom {
            name: name.to_string(),
            data,
        })
    }

    /// Will return a slice internal values of the given data
    pub fn get_data(&self) -> &[u8] {
        &self.data
    }

    /// Will return the name of the rom.
    pub fn get_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rom_fits_memory() {
        let rom = Rom::new("FULL", vec![0xAA; MAX_ROM_SIZE]).unwrap();
        assert_eq!(rom.get_name(), "FULL");
        assert_eq!(rom.get_data().len(), MAX_ROM_SIZE);

        let err = Rom::new("BIG", vec![0; MAX_ROM_SIZE + 2]).unwrap_err();
        assert_eq!(
            err,
            RomError::TooLarge {
                name: "BIG".to_string(),
                len: MAX_ROM_SIZE + 2,
                max: MAX_ROM_SIZE,
            }
        );
    }
}
