//! Presenter-side state: the current image and settings, the last good
//! output, and which image load is still current.
//!
//! Loads happen outside this crate. Each one is started with
//! [`Session::begin_load`], which hands out a [`LoadTicket`] and invalidates
//! every earlier ticket. Only a load whose ticket is still current may move
//! the session to `Ready` or `Failed`; later completions of superseded loads
//! are dropped.

use crate::buffer::PixelBuffer;
use crate::grid::Conversion;
use crate::settings::ConversionSettings;
use crate::{convert, PicasciiError, Result};

/// Identifies one image load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug)]
pub enum LoadState {
    /// No image yet.
    Idle,
    Loading { generation: u64 },
    /// `output` reflects the current image and settings.
    Ready,
    /// The last load or conversion failed; `output` (if any) is stale.
    Failed { error: PicasciiError },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer load was started after this one; the result was discarded.
    Stale,
}

#[derive(Debug)]
pub struct Session {
    state: LoadState,
    generation: u64,
    settings: ConversionSettings,
    image: Option<PixelBuffer>,
    output: Option<Conversion>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ConversionSettings::default())
    }
}

impl Session {
    pub fn new(settings: ConversionSettings) -> Self {
        Self { state: LoadState::Idle, generation: 0, settings, image: None, output: None }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn settings(&self) -> &ConversionSettings {
        &self.settings
    }

    pub fn image(&self) -> Option<&PixelBuffer> {
        self.image.as_ref()
    }

    /// Last successfully produced output. Check [`Session::is_fresh`] before
    /// presenting it as current.
    pub fn output(&self) -> Option<&Conversion> {
        self.output.as_ref()
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self.state, LoadState::Ready)
    }

    /// Start a new load, superseding any load still in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = LoadState::Loading { generation: self.generation };
        LoadTicket(self.generation)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        matches!(self.state, LoadState::Loading { generation } if generation == ticket.0)
    }

    /// Deliver the result of the load identified by `ticket`.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<PixelBuffer>,
    ) -> LoadOutcome {
        if !self.is_current(ticket) {
            tracing::debug!(ticket = ticket.0, current = self.generation, "dropping stale load");
            return LoadOutcome::Stale;
        }

        match result {
            Ok(image) => {
                self.image = Some(image);
                self.recompute();
            }
            Err(error) => {
                tracing::warn!(%error, "image load failed");
                self.state = LoadState::Failed { error };
            }
        }
        LoadOutcome::Applied
    }

    /// Replace the settings and recompute from the current image.
    ///
    /// While a load is in flight only the settings are stored; the pending
    /// load converts with them when it lands.
    pub fn update_settings(&mut self, settings: ConversionSettings) {
        self.settings = settings;
        if matches!(self.state, LoadState::Loading { .. }) || self.image.is_none() {
            return;
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        let Some(image) = self.image.as_ref() else {
            return;
        };
        match convert(image, &self.settings) {
            Ok(conversion) => {
                self.output = Some(conversion);
                self.state = LoadState::Ready;
            }
            Err(error) => {
                tracing::warn!(%error, "conversion failed, keeping previous output");
                self.state = LoadState::Failed { error };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ramp::Ramp;

    fn solid(width: u32, height: u32, value: u8) -> PixelBuffer {
        let data = vec![value; (width * height * 4) as usize];
        PixelBuffer::from_rgba(width, height, data).unwrap()
    }

    fn full_res() -> ConversionSettings {
        ConversionSettings { resolution: 1.0, ..Default::default() }
    }

    #[test]
    fn starts_idle() {
        let session = Session::default();
        assert!(matches!(session.state(), LoadState::Idle));
        assert!(session.output().is_none());
        assert!(!session.is_fresh());
    }

    #[test]
    fn load_then_ready() {
        let mut session = Session::new(full_res());
        let ticket = session.begin_load();
        assert!(matches!(session.state(), LoadState::Loading { generation: 1 }));
        assert_eq!(session.finish_load(ticket, Ok(solid(1, 1, 255))), LoadOutcome::Applied);
        assert!(session.is_fresh());
        assert_eq!(session.output().unwrap().text, "@\n");
    }

    #[test]
    fn superseded_load_is_discarded() {
        let mut session = Session::new(full_res());
        let first = session.begin_load();
        let second = session.begin_load();
        assert!(!session.is_current(first));

        assert_eq!(session.finish_load(second, Ok(solid(1, 1, 0))), LoadOutcome::Applied);
        // the older load finishing late must not overwrite the newer image
        assert_eq!(session.finish_load(first, Ok(solid(1, 1, 255))), LoadOutcome::Stale);
        assert_eq!(session.output().unwrap().text, " \n");
    }

    #[test]
    fn ticket_is_single_use() {
        let mut session = Session::new(full_res());
        let ticket = session.begin_load();
        session.finish_load(ticket, Ok(solid(1, 1, 0)));
        assert_eq!(session.finish_load(ticket, Ok(solid(1, 1, 255))), LoadOutcome::Stale);
    }

    #[test]
    fn failed_load_keeps_last_good_output() {
        let mut session = Session::new(full_res());
        let ticket = session.begin_load();
        session.finish_load(ticket, Ok(solid(1, 1, 255)));

        let ticket = session.begin_load();
        let err = PixelBuffer::from_rgba(0, 0, vec![]).unwrap_err();
        session.finish_load(ticket, Err(err));

        assert!(matches!(
            session.state(),
            LoadState::Failed { error: PicasciiError::InvalidDimensions { .. } }
        ));
        assert!(!session.is_fresh());
        assert_eq!(session.output().unwrap().text, "@\n");
    }

    #[test]
    fn settings_change_recomputes_wholesale() {
        let mut session = Session::new(full_res());
        let ticket = session.begin_load();
        session.finish_load(ticket, Ok(solid(1, 1, 255)));

        session.update_settings(ConversionSettings { char_set: Ramp::Blocks, ..full_res() });
        assert_eq!(session.output().unwrap().text, "█\n");

        session.update_settings(ConversionSettings { inverted: true, ..full_res() });
        assert_eq!(session.output().unwrap().text, " \n");
        assert!(session.is_fresh());
    }

    #[test]
    fn invalid_settings_fail_without_clearing_output() {
        let mut session = Session::new(full_res());
        let ticket = session.begin_load();
        session.finish_load(ticket, Ok(solid(1, 1, 255)));

        session.update_settings(ConversionSettings { resolution: -1.0, ..full_res() });
        assert!(matches!(
            session.state(),
            LoadState::Failed { error: PicasciiError::InvalidSettings(_) }
        ));
        assert_eq!(session.output().unwrap().text, "@\n");
    }

    #[test]
    fn settings_during_load_apply_on_completion() {
        let mut session = Session::new(full_res());
        let ticket = session.begin_load();
        session.update_settings(ConversionSettings { char_set: Ramp::Minimal, ..full_res() });
        session.finish_load(ticket, Ok(solid(1, 1, 255)));
        assert_eq!(session.output().unwrap().text, "#\n");
    }
}
