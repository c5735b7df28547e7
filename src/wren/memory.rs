// wren/memory.rs
use super::cell::Cell;
use super::devices::Devices;
use super::errors::Fault;

pub const MEMORY_SIZE: usize = 256;

/// First address of the memory-mapped I/O window.
pub const PORT_BASE: u8 = 240;

/// 256-cell address space. Addresses below [`PORT_BASE`] are plain storage;
/// the window above it routes to the peripheral capabilities. Port writes
/// still update the backing cell so offset arithmetic over the window stays
/// consistent; port reads go to the peripheral (or the entropy source) for
/// the few addresses that define one.
pub struct Memory {
    cells: [Cell; MEMORY_SIZE],
    devices: Devices,
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory")
            .field("cells", &self.cells)
            .finish_non_exhaustive()
    }
}

impl Memory {
    pub fn new(devices: Devices) -> Self {
        Self { cells: [Cell::default(); MEMORY_SIZE], devices }
    }

    pub fn write_unsigned(&mut self, address: u8, value: u8) -> Result<(), Fault> {
        self.cells[address as usize].set_unsigned(value as i32);

        if address >= PORT_BASE {
            match address {
                240 => self.devices.screen.set_x(value),
                241 => self.devices.screen.set_y(value),
                242 => self.devices.screen.draw_pixel(),
                243 => self.devices.screen.clear_pixel(),
                245 => self.devices.screen.push(),
                246 => self.devices.screen.clear(),
                247 => self.devices.chars.write(value),
                248 => self.devices.chars.push(),
                249 => self.devices.chars.clear(),
                250 => self.devices.number.show(value),
                251 => self.devices.number.clear(),
                252 => self.devices.number.signed_mode(),
                253 => self.devices.number.unsigned_mode(),
                // 244 (load_pixel) and 255 (controller) have no write mapping
                _ => return Err(Fault::UnmappedWrite { address }),
            }
        }

        Ok(())
    }

    pub fn read_unsigned(&self, address: u8) -> Result<u8, Fault> {
        if address >= PORT_BASE {
            return match address {
                240 => Ok(self.devices.screen.get_x()),
                241 => Ok(self.devices.screen.get_y()),
                244 => Ok(self.devices.screen.load_pixel()),
                254 => Ok(rand::random::<u8>()),
                _ => Err(Fault::UnmappedRead { address }),
            };
        }

        Ok(self.cells[address as usize].unsigned())
    }

    /// Raw backing-cell read, bypassing port dispatch. For inspection only.
    pub fn raw(&self, address: u8) -> u8 {
        self.cells[address as usize].unsigned()
    }
}
