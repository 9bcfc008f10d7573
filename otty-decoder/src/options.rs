use serde::{Deserialize, Serialize};

/// Configuration knobs that influence how the decoder behaves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderOptions {
    /// Blink cycles the cursor stays solid after it moves or text is
    /// inserted.
    pub blink_suppression_cycles: u32,
    /// Longest CSI parameter text accepted before the sequence is dropped.
    pub max_csi_len: usize,
    /// Parameters reported in reply to primary device attributes (`CSI c`).
    pub device_attributes: String,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            blink_suppression_cycles: 1,
            max_csi_len: 64,
            device_attributes: String::from("?1;2"),
        }
    }
}
