//! Discovered network records supplied by the scanning collaborator.

use heapless::String;

/// SSID capacity in bytes (802.11 limit).
pub const SSID_BYTES: usize = 32;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AuthMode {
    Open,
    Wep,
    WpaPsk,
    Wpa2Psk,
    WpaWpa2Psk,
    Wpa3Psk,
    Wpa2Wpa3Psk,
    Wpa2Enterprise,
    #[default]
    Unknown,
}

/// One scanned access point. Immutable once stored in the list.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NetworkRecord {
    pub ssid: String<SSID_BYTES>,
    pub bssid: [u8; 6],
    pub channel: u8,
    pub rssi: i8,
    pub auth: AuthMode,
}

impl NetworkRecord {
    /// Builds a record, truncating `ssid` on a char boundary to 32 bytes.
    pub fn new(ssid: &str, bssid: [u8; 6], channel: u8, rssi: i8, auth: AuthMode) -> Self {
        Self {
            ssid: truncated_ssid(ssid),
            bssid,
            channel,
            rssi,
            auth,
        }
    }

    /// Name shown on the display.
    pub fn name(&self) -> &str {
        self.ssid.as_str()
    }

    pub fn is_hidden(&self) -> bool {
        self.ssid.is_empty()
    }
}

fn truncated_ssid(ssid: &str) -> String<SSID_BYTES> {
    let mut out = String::new();
    for c in ssid.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
