use std::collections::HashMap;

use super::{AdapterInfo, DisplayDeviceRecord, ModeCatalog};
use crate::{DisplayBackend, HelperResult};

/// Device key to raw adapter addressing, rebuilt by every enumeration.
pub type DeviceCache = HashMap<String, AdapterInfo>;

/// The outcome of one enumeration pass.
#[derive(Debug, Default)]
pub struct Enumeration {
    /// Devices in adapter order.
    pub devices: Vec<DisplayDeviceRecord>,
    /// `false` when a backend error cut the walk short. `devices` then
    /// holds the prefix built before the error.
    pub complete: bool,
}

/// Walks all display adapters and rebuilds `cache` from scratch.
///
/// Adapters without an attached monitor, or whose current mode cannot be
/// read, are skipped and left out of the cache. Backend errors stop the
/// walk; whatever was collected up to that point is still returned.
pub fn enumerate<B: DisplayBackend + ?Sized>(backend: &B, cache: &mut DeviceCache) -> Enumeration {
    cache.clear();

    let mut devices = Vec::new();
    let result = walk_adapters(backend, cache, &mut devices);

    if let Err(ref e) = result {
        crate::log_warn!(
            "display enumeration stopped after {} device(s): {e}",
            devices.len()
        );
    }

    Enumeration {
        devices,
        complete: result.is_ok(),
    }
}

fn walk_adapters<B: DisplayBackend + ?Sized>(
    backend: &B,
    cache: &mut DeviceCache,
    devices: &mut Vec<DisplayDeviceRecord>,
) -> HelperResult<()> {
    let mut index = 0u32;

    while let Some(adapter) = backend.adapter(index)? {
        // The monitor is looked up at the adapter's own index.
        let monitor_index = index;
        index += 1;

        let Some(monitor) = backend.monitor(&adapter, monitor_index)? else {
            crate::log_debug!("skipping {}: no monitor attached", adapter.device_name);
            continue;
        };

        let Some(current) = backend.current_mode(&adapter)? else {
            crate::log_debug!("skipping {}: no current mode", adapter.device_name);
            continue;
        };

        let mut catalog = ModeCatalog::new();
        let mut mode_index = 0u32;
        while let Some(mode) = backend.mode(&adapter, mode_index)? {
            catalog.insert(mode);
            mode_index += 1;
        }

        crate::log_debug!(
            "{}: current {current}, {} distinct of {mode_index} reported modes",
            adapter.device_name,
            catalog.len()
        );

        devices.push(DisplayDeviceRecord::new(
            &adapter,
            monitor,
            current,
            catalog.into_modes(),
        ));
        cache.insert(adapter.key.clone(), adapter);
    }

    Ok(())
}
