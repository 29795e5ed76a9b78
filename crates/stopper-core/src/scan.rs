//! One scan cycle: placeholder, scan, bulk load, single render.

use log::{info, warn};

use crate::{model::NetworkListModel, network::NetworkRecord, text::TextDisplay};

/// Producer of nearby network records.
#[allow(async_fn_in_trait)]
pub trait NetworkScanner {
    type Error;

    /// Runs a scan and replaces the stored results.
    async fn scan_nearby(&mut self) -> Result<(), Self::Error>;

    /// Records from the last successful scan.
    fn results(&self) -> &[NetworkRecord];
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScanError<ScanErr, DisplayErr> {
    Scan(ScanErr),
    Display(DisplayErr),
}

/// Shows `SCANNING...`, scans, then loads the results into `model`.
///
/// Returns the number of records kept. A failed scan leaves the list empty
/// with the placeholder still on screen. A fault while showing the
/// placeholder does not stop the cycle: the list is still loaded and
/// rendered, and the fault is returned afterwards.
pub async fn scan_and_display<S, D, const N: usize>(
    scanner: &mut S,
    model: &mut NetworkListModel<D, N>,
) -> Result<usize, ScanError<S::Error, D::Error>>
where
    S: NetworkScanner,
    D: TextDisplay,
{
    let placeholder_fault = model.clear().err();
    if placeholder_fault.is_some() {
        warn!("scan: placeholder render failed, scanning anyway");
    }

    if let Err(err) = scanner.scan_nearby().await {
        warn!("scan: failed, list left empty");
        return Err(ScanError::Scan(err));
    }

    let found = scanner.results().len();
    let stored = model
        .replace_all(scanner.results().iter().cloned())
        .map_err(ScanError::Display)?;
    info!("scan: {} found, {} shown", found, stored);

    match placeholder_fault {
        Some(err) => Err(ScanError::Display(err)),
        None => Ok(stored),
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;

    use super::*;
    use crate::{
        model::{MAX_NETWORKS, SCANNING_MESSAGE},
        network::AuthMode,
        testing::{BusFault, MemoryDisplay},
    };

    struct FakeScanner {
        pending: Vec<NetworkRecord>,
        results: Vec<NetworkRecord>,
        fail: bool,
        calls: usize,
    }

    impl FakeScanner {
        fn finding(names: &[&str]) -> Self {
            Self {
                pending: names
                    .iter()
                    .enumerate()
                    .map(|(i, name)| {
                        NetworkRecord::new(name, [0, 0, 0, 0, 0, i as u8], 1, -70, AuthMode::Open)
                    })
                    .collect(),
                results: Vec::new(),
                fail: false,
                calls: 0,
            }
        }
    }

    impl NetworkScanner for FakeScanner {
        type Error = BusFault;

        async fn scan_nearby(&mut self) -> Result<(), Self::Error> {
            self.calls += 1;
            if self.fail {
                return Err(BusFault);
            }
            self.results = self.pending.clone();
            Ok(())
        }

        fn results(&self) -> &[NetworkRecord] {
            &self.results
        }
    }

    #[test]
    fn scan_cycle_shows_placeholder_then_list() {
        let mut scanner = FakeScanner::finding(&["HOME", "CAFE"]);
        let mut model: NetworkListModel<MemoryDisplay> = NetworkListModel::new(MemoryDisplay::new());

        let stored = block_on(scan_and_display(&mut scanner, &mut model)).unwrap();

        assert_eq!(stored, 2);
        assert_eq!(model.display().flush_count(), 2);
        assert!(model.display().shows(">HOME\n CAFE\n"));
    }

    #[test]
    fn results_beyond_capacity_are_dropped() {
        let names = ["N0", "N1", "N2", "N3", "N4", "N5", "N6", "N7", "N8", "N9", "NA", "NB"];
        let mut scanner = FakeScanner::finding(&names);
        let mut model: NetworkListModel<MemoryDisplay> = NetworkListModel::new(MemoryDisplay::new());

        let stored = block_on(scan_and_display(&mut scanner, &mut model)).unwrap();

        assert_eq!(stored, MAX_NETWORKS);
        assert_eq!(model.list().records().last().map(NetworkRecord::name), Some("N9"));
    }

    #[test]
    fn rescan_resets_the_cursor() {
        let mut scanner = FakeScanner::finding(&["A", "B", "C"]);
        let mut model: NetworkListModel<MemoryDisplay> = NetworkListModel::new(MemoryDisplay::new());
        block_on(scan_and_display(&mut scanner, &mut model)).unwrap();
        model.select_next().unwrap();
        model.select_next().unwrap();

        block_on(scan_and_display(&mut scanner, &mut model)).unwrap();
        assert_eq!(model.list().selected_index(), Some(0));
    }

    #[test]
    fn failed_scan_leaves_placeholder() {
        let mut scanner = FakeScanner::finding(&["HOME"]);
        scanner.fail = true;
        let mut model: NetworkListModel<MemoryDisplay> = NetworkListModel::new(MemoryDisplay::new());

        let result = block_on(scan_and_display(&mut scanner, &mut model));

        assert_eq!(result, Err(ScanError::Scan(BusFault)));
        assert!(model.list().is_empty());
        assert!(model.display().shows(SCANNING_MESSAGE));
    }

    #[test]
    fn placeholder_fault_does_not_skip_the_scan() {
        let mut scanner = FakeScanner::finding(&["HOME"]);
        let mut display = MemoryDisplay::new();
        display.fail_next_flushes(1);
        let mut model: NetworkListModel<MemoryDisplay> = NetworkListModel::new(display);

        let result = block_on(scan_and_display(&mut scanner, &mut model));

        assert_eq!(result, Err(ScanError::Display(BusFault)));
        assert_eq!(scanner.calls, 1);
        assert_eq!(model.list().len(), 1);
        assert!(model.display().shows(">HOME\n"));
    }
}
