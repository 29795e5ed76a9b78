//! Station-mode Wi-Fi scanning through esp-radio.

use esp_radio::wifi::{
    AccessPointInfo, AuthMethod, ClientConfig, ModeConfig, ScanConfig, WifiController, WifiError,
};
use heapless::Vec;
use log::{debug, info};
use stopper_core::{
    MAX_NETWORKS,
    network::{AuthMode, NetworkRecord},
    scan::NetworkScanner,
};

/// Scanner over an esp-radio controller in client mode.
///
/// Keeps only the first [`MAX_NETWORKS`] access points the radio reports.
pub struct WifiScanner<'d> {
    controller: WifiController<'d>,
    results: Vec<NetworkRecord, MAX_NETWORKS>,
    started: bool,
}

impl<'d> WifiScanner<'d> {
    /// Puts the controller in client mode without joining any network.
    pub fn new(mut controller: WifiController<'d>) -> Result<Self, WifiError> {
        controller.set_config(&ModeConfig::Client(ClientConfig::default()))?;
        Ok(Self {
            controller,
            results: Vec::new(),
            started: false,
        })
    }

    async fn ensure_started(&mut self) -> Result<(), WifiError> {
        if self.started {
            return Ok(());
        }
        self.controller.start_async().await?;
        self.started = true;
        info!("wifi: radio started for scanning");
        Ok(())
    }
}

impl NetworkScanner for WifiScanner<'_> {
    type Error = WifiError;

    async fn scan_nearby(&mut self) -> Result<(), Self::Error> {
        self.ensure_started().await?;
        self.results.clear();

        let found = self
            .controller
            .scan_with_config_async(ScanConfig::default())
            .await?;

        for ap in found.iter().take(MAX_NETWORKS) {
            let record = record_from_ap(ap);
            debug!(
                "wifi: {:?} ch={} rssi={} auth={:?}",
                record.name(),
                record.channel,
                record.rssi,
                record.auth
            );
            let _ = self.results.push(record);
        }

        info!("wifi: scan returned {} access points", found.len());
        Ok(())
    }

    fn results(&self) -> &[NetworkRecord] {
        &self.results
    }
}

fn record_from_ap(ap: &AccessPointInfo) -> NetworkRecord {
    NetworkRecord::new(
        ap.ssid.as_str(),
        ap.bssid,
        ap.channel,
        ap.signal_strength,
        auth_mode(ap.auth_method.as_ref()),
    )
}

fn auth_mode(method: Option<&AuthMethod>) -> AuthMode {
    match method {
        Some(AuthMethod::None) => AuthMode::Open,
        Some(AuthMethod::Wep) => AuthMode::Wep,
        Some(AuthMethod::Wpa) => AuthMode::WpaPsk,
        Some(AuthMethod::Wpa2Personal) => AuthMode::Wpa2Psk,
        Some(AuthMethod::WpaWpa2Personal) => AuthMode::WpaWpa2Psk,
        Some(AuthMethod::Wpa3Personal) => AuthMode::Wpa3Psk,
        Some(AuthMethod::Wpa2Wpa3Personal) => AuthMode::Wpa2Wpa3Psk,
        Some(AuthMethod::Wpa2Enterprise) => AuthMode::Wpa2Enterprise,
        _ => AuthMode::Unknown,
    }
}
