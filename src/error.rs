#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A field was outside its domain (seconds/minutes 0..=59, hours 0..=23)
    InvalidTime,
    /// Unable to read an input or drive an output pin
    Port,
    /// Timer configuration with a zero field
    InvalidConfig,
}
