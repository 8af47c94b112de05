use super::state::{FilterState, derive_state};
use crate::selection::{SelectionParseError, SelectionSet, parse_selection};
use crate::settings::{
    SettingType, SettingsError, SettingsStore, TestNumberFilterSetting, storage_key,
};
use tracing::{debug, warn};

/// Caller-side state of the test number filter
///
/// Holds the raw input text, the enabled toggle and the last selection that
/// parsed successfully. Every successful update returns the [`FilterState`] to
/// publish; a failed edit leaves the previous selection in place.
#[derive(Debug, Clone, Default)]
pub struct TestNumberFilter {
    enabled: bool,
    text: String,
    selection: SelectionSet,
    error: Option<SelectionParseError>,
}

impl TestNumberFilter {
    /// Disabled, with no test numbers selected
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The last selection that parsed successfully
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// The diagnostic of the most recent failed edit, cleared by the next good one
    pub fn error(&self) -> Option<&SelectionParseError> {
        self.error.as_ref()
    }

    pub fn current_state(&self, strengthened: bool) -> FilterState {
        derive_state(&self.selection, self.enabled, strengthened)
    }

    /// Handle an edit of the input text
    pub fn value_changed(&mut self, text: &str) -> Result<FilterState, SelectionParseError> {
        self.text = text.to_string();

        match parse_selection(text) {
            Ok(selection) => {
                let strengthened = selection.is_subset_of(&self.selection);
                debug!(%selection, strengthened, "test number selection updated");
                self.selection = selection;
                self.error = None;
                Ok(self.current_state(strengthened))
            }
            Err(e) => {
                debug!(text, error = %e, "keeping previous test number selection");
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Handle a toggle of the enabled checkbox
    ///
    /// Always yields a state. The current text is parsed again; if it does not
    /// parse, the previous selection stays and the update is not strengthened.
    pub fn set_enabled(&mut self, enabled: bool) -> FilterState {
        self.enabled = enabled;

        let strengthened = match parse_selection(&self.text) {
            Ok(selection) => {
                let strengthened = selection.is_subset_of(&self.selection);
                self.selection = selection;
                strengthened
            }
            Err(_) => false,
        };

        debug!(enabled, strengthened, "test number filter toggled");
        self.current_state(strengthened)
    }

    /// Reset to defaults, then apply the stored setting for `device_id` if any
    ///
    /// Returns the state to publish on initial load. Stored text that does not
    /// parse leaves the default selection and records the diagnostic.
    pub fn restore(
        &mut self,
        store: &dyn SettingsStore,
        device_id: &str,
    ) -> Result<FilterState, SettingsError> {
        *self = Self::default();

        let key = storage_key(device_id, SettingType::TestNumberFilter);
        if let Some(setting) = store.load(&key)? {
            self.enabled = setting.enabled;
            if let Err(e) = self.value_changed(&setting.selected_test_numbers) {
                warn!(key = %key, error = %e, "stored test number selection is invalid");
            }
        }

        Ok(self.current_state(false))
    }

    /// Persist the current text and toggle for `device_id`
    pub fn save(
        &self,
        store: &mut dyn SettingsStore,
        device_id: &str,
    ) -> Result<(), SettingsError> {
        let key = storage_key(device_id, SettingType::TestNumberFilter);
        store.save(&key, &self.to_setting())
    }

    pub fn to_setting(&self) -> TestNumberFilterSetting {
        TestNumberFilterSetting {
            enabled: self.enabled,
            selected_test_numbers: self.text.clone(),
        }
    }
}
