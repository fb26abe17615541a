use super::{
    AdapterInfo, ChangeMode, DeviceCache, DisplayMode, ModeChange, ModeChangeStatus, ModeFields,
};
use crate::{DisplayBackend, HelperResult, UnknownDeviceKey};

/// A resolution requested by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeRequest {
    pub width: i32,
    pub height: i32,
    /// `0` (or less) keeps the current refresh rate.
    pub refresh_rate: i32,
}

impl ModeRequest {
    /// Builds the change from the adapter's current mode.
    ///
    /// Width and height are always overwritten. The refresh rate is only
    /// overwritten, and only marked as changed, when it is positive.
    pub fn to_change(self, mut base: DisplayMode) -> ModeChange {
        base.width = self.width;
        base.height = self.height;
        let mut fields = ModeFields::WIDTH | ModeFields::HEIGHT;

        if self.refresh_rate > 0 {
            base.refresh_rate = self.refresh_rate;
            fields |= ModeFields::FREQUENCY;
        }

        ModeChange { mode: base, fields }
    }
}

/// Changes the mode of the adapter cached under `key`.
///
/// # Errors
///
/// Returns [`UnknownDeviceKey`] if `key` was not produced by the most
/// recent enumeration. Unlike the rest of the surface this is a hard
/// failure, never a `false` result.
pub fn set_resolution<B: DisplayBackend + ?Sized>(
    backend: &B,
    cache: &DeviceCache,
    key: &str,
    request: ModeRequest,
) -> HelperResult<bool> {
    let adapter = cache
        .get(key)
        .ok_or_else(|| UnknownDeviceKey(key.to_string()))?;
    Ok(change_resolution(backend, adapter, request))
}

/// Changes the mode of `adapter`.
///
/// The change is first validated by the OS and only applied if validation
/// succeeds. Returns whether the OS reported success for the applied
/// change. Backend errors are logged and reported as `false`.
pub fn change_resolution<B: DisplayBackend + ?Sized>(
    backend: &B,
    adapter: &AdapterInfo,
    request: ModeRequest,
) -> bool {
    let current = match backend.current_mode(adapter) {
        Ok(Some(mode)) => mode,
        Ok(None) => {
            crate::log_warn!("{}: current mode unavailable", adapter.device_name);
            return false;
        }
        Err(e) => {
            crate::log_warn!("{}: current mode query failed: {e}", adapter.device_name);
            return false;
        }
    };

    let change = request.to_change(current);

    let Some(tested) = try_change(backend, adapter, &change, ChangeMode::Test) else {
        return false;
    };
    if !tested.is_success() {
        crate::log_info!(
            "{}: {} rejected by validation ({tested:?})",
            adapter.device_name,
            change.mode
        );
        return false;
    }

    let Some(applied) = try_change(backend, adapter, &change, ChangeMode::Apply) else {
        return false;
    };
    crate::log_info!(
        "{}: applied {} ({applied:?})",
        adapter.device_name,
        change.mode
    );
    applied.is_success()
}

/// Runs one change call, logging and swallowing a backend error.
fn try_change<B: DisplayBackend + ?Sized>(
    backend: &B,
    adapter: &AdapterInfo,
    change: &ModeChange,
    mode: ChangeMode,
) -> Option<ModeChangeStatus> {
    backend
        .change_mode(adapter, change, mode)
        .inspect_err(|e| {
            crate::log_warn!(
                "{}: {mode:?} of {} failed: {e}",
                adapter.device_name,
                change.mode
            );
        })
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::enumerate;
    use crate::testing::{FakeAdapter, FakePlatform};

    fn request(width: i32, height: i32, refresh_rate: i32) -> ModeRequest {
        ModeRequest {
            width,
            height,
            refresh_rate,
        }
    }

    fn enumerated(platform: &FakePlatform) -> DeviceCache {
        let mut cache = DeviceCache::new();
        enumerate(platform, &mut cache);
        cache
    }

    #[test]
    fn unknown_key_is_a_hard_error() {
        // Arrange
        let platform = FakePlatform::new();
        let cache = enumerated(&platform);

        // Act
        let result = set_resolution(&platform, &cache, "missing", request(800, 600, 0));

        // Assert
        let err = result.unwrap_err();
        assert_eq!(
            err.downcast_ref::<UnknownDeviceKey>(),
            Some(&UnknownDeviceKey("missing".into()))
        );
    }

    #[test]
    fn failed_validation_returns_false_without_applying() {
        // Arrange
        let platform = FakePlatform::new()
            .with_adapter(FakeAdapter::new("key-a", r"\\.\DISPLAY1"))
            .with_test_status(ModeChangeStatus::BadMode);
        let cache = enumerated(&platform);

        // Act
        let ok = set_resolution(&platform, &cache, "key-a", request(640, 480, 0)).unwrap();

        // Assert
        assert!(!ok);
        let calls = platform.mode_changes();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, ChangeMode::Test);
        assert_eq!(
            platform.current_mode_of("key-a"),
            Some(DisplayMode::new(1920, 1080, 32, 60))
        );
    }

    #[test]
    fn successful_validation_applies_change() {
        // Arrange
        let platform = FakePlatform::new().with_adapter(FakeAdapter::new("key-a", r"\\.\DISPLAY1"));
        let cache = enumerated(&platform);

        // Act
        let ok = set_resolution(&platform, &cache, "key-a", request(1280, 720, 75)).unwrap();

        // Assert
        assert!(ok);
        let modes: Vec<_> = platform.mode_changes().iter().map(|c| c.1).collect();
        assert_eq!(modes, [ChangeMode::Test, ChangeMode::Apply]);
        assert_eq!(
            platform.current_mode_of("key-a"),
            Some(DisplayMode::new(1280, 720, 32, 75))
        );
    }

    #[test]
    fn apply_failure_returns_false() {
        // Arrange
        let platform = FakePlatform::new()
            .with_adapter(FakeAdapter::new("key-a", r"\\.\DISPLAY1"))
            .with_apply_status(ModeChangeStatus::Failed);
        let cache = enumerated(&platform);

        // Act
        let ok = set_resolution(&platform, &cache, "key-a", request(1280, 720, 0)).unwrap();

        // Assert
        assert!(!ok);
        assert_eq!(platform.mode_changes().len(), 2);
    }

    #[test]
    fn restart_required_counts_as_failed_validation() {
        let platform = FakePlatform::new()
            .with_adapter(FakeAdapter::new("key-a", r"\\.\DISPLAY1"))
            .with_test_status(ModeChangeStatus::Restart);
        let cache = enumerated(&platform);

        let ok = set_resolution(&platform, &cache, "key-a", request(1280, 720, 0)).unwrap();

        assert!(!ok);
        assert_eq!(platform.mode_changes().len(), 1);
    }

    #[test]
    fn zero_refresh_rate_keeps_current_frequency() {
        // Act
        let change = request(1024, 768, 0).to_change(DisplayMode::new(1920, 1080, 32, 144));

        // Assert
        assert_eq!(change.mode, DisplayMode::new(1024, 768, 32, 144));
        assert_eq!(change.fields, ModeFields::WIDTH | ModeFields::HEIGHT);
    }

    #[test]
    fn positive_refresh_rate_is_marked_changed() {
        // Act
        let change = request(1024, 768, 60).to_change(DisplayMode::new(1920, 1080, 32, 144));

        // Assert
        assert_eq!(change.mode.refresh_rate, 60);
        assert!(change.fields.contains(ModeFields::FREQUENCY));
    }

    #[test]
    fn base_mode_is_requeried_not_taken_from_enumeration() {
        // Arrange
        let platform = FakePlatform::new().with_adapter(FakeAdapter::new("key-a", r"\\.\DISPLAY1"));
        let cache = enumerated(&platform);
        platform.set_current_mode("key-a", DisplayMode::new(2560, 1440, 24, 120));

        // Act
        set_resolution(&platform, &cache, "key-a", request(1280, 720, 0)).unwrap();

        // Assert
        let (change, _) = platform.mode_changes()[0];
        assert_eq!(change.mode.bit_depth, 24);
        assert_eq!(change.mode.refresh_rate, 120);
    }

    #[test]
    fn missing_current_mode_returns_false() {
        // Arrange
        let platform = FakePlatform::new().with_adapter(FakeAdapter::new("key-a", r"\\.\DISPLAY1"));
        let cache = enumerated(&platform);
        platform.clear_current_mode("key-a");

        // Act
        let ok = set_resolution(&platform, &cache, "key-a", request(1280, 720, 0)).unwrap();

        // Assert
        assert!(!ok);
        assert!(platform.mode_changes().is_empty());
    }

    #[test]
    fn backend_error_during_validation_returns_false() {
        // Arrange
        let platform = FakePlatform::new()
            .with_adapter(FakeAdapter::new("key-a", r"\\.\DISPLAY1"))
            .with_change_error(ChangeMode::Test);
        let cache = enumerated(&platform);

        // Act
        let result = set_resolution(&platform, &cache, "key-a", request(-1, 600, 0));

        // Assert
        assert!(!result.unwrap());
        assert_eq!(platform.mode_changes().len(), 1);
        assert_eq!(
            platform.current_mode_of("key-a"),
            Some(DisplayMode::new(1920, 1080, 32, 60))
        );
    }

    #[test]
    fn backend_error_during_apply_returns_false() {
        // Arrange
        let platform = FakePlatform::new()
            .with_adapter(FakeAdapter::new("key-a", r"\\.\DISPLAY1"))
            .with_change_error(ChangeMode::Apply);
        let cache = enumerated(&platform);

        // Act
        let result = set_resolution(&platform, &cache, "key-a", request(1280, 720, 0));

        // Assert
        assert!(!result.unwrap());
        let modes: Vec<_> = platform.mode_changes().iter().map(|c| c.1).collect();
        assert_eq!(modes, [ChangeMode::Test, ChangeMode::Apply]);
    }
}
