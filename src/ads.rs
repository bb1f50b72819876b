//! Ad display surface
//!
//! Mirrors the shape of a mobile ad SDK: a passive banner plus a
//! full-screen interstitial with a closed callback. Stage advancement is
//! gated on the interstitial when one is ready and proceeds immediately
//! otherwise; `flow::gate_on_interstitial` wraps that decision.

/// Banner and interstitial ads. Readiness is polled, never awaited.
pub trait AdSurface {
    fn show_banner(&mut self);
    fn hide_banner(&mut self);
    fn is_interstitial_ready(&self) -> bool;
    /// Display the interstitial and invoke `on_closed` once it is
    /// dismissed. Implementations that cannot show one call it right away.
    fn show_interstitial<'a>(&mut self, on_closed: Box<dyn FnOnce() + 'a>);
}

/// Ad-free backend: no banner, interstitial never ready
#[derive(Debug, Default)]
pub struct NullAds;

impl AdSurface for NullAds {
    fn show_banner(&mut self) {}
    fn hide_banner(&mut self) {}

    fn is_interstitial_ready(&self) -> bool {
        false
    }

    fn show_interstitial<'a>(&mut self, on_closed: Box<dyn FnOnce() + 'a>) {
        on_closed();
    }
}

/// Logs ad traffic and reports the interstitial as always ready;
/// the demo bin's stand-in for a real network
#[derive(Debug, Default)]
pub struct LogAds {
    banner_visible: bool,
}

impl LogAds {
    pub fn banner_visible(&self) -> bool {
        self.banner_visible
    }
}

impl AdSurface for LogAds {
    fn show_banner(&mut self) {
        self.banner_visible = true;
        log::info!("ads: banner shown");
    }

    fn hide_banner(&mut self) {
        self.banner_visible = false;
        log::info!("ads: banner hidden");
    }

    fn is_interstitial_ready(&self) -> bool {
        true
    }

    fn show_interstitial<'a>(&mut self, on_closed: Box<dyn FnOnce() + 'a>) {
        log::info!("ads: interstitial shown, closing");
        on_closed();
    }
}
