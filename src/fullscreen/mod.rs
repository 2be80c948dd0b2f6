//! Fullscreen capability detection
//!
//! Browsers expose fullscreen under the standard names or under one of the
//! vendor-prefixed variants. [`FullscreenAdapter`] probes the host once,
//! binds to the first API it finds and gives the controller a uniform
//! request / is-active / change-notification interface. Without any API the
//! adapter is inert and every call is a no-op.

mod simulated;

pub use simulated::SimulatedFullscreen;

use crate::utils::error::Result;
use log::{debug, info, warn};

/// Fullscreen API flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FullscreenVendor {
    /// `requestFullscreen` / `fullscreenElement`
    Standard,

    /// `webkitRequestFullscreen` / `webkitFullscreenElement`
    Webkit,

    /// `mozRequestFullScreen` / `mozFullScreenElement`
    Moz,

    /// `msRequestFullscreen` / `msFullscreenElement`
    Ms,
}

impl FullscreenVendor {
    /// Probe order, most preferred first
    pub const PROBE_ORDER: [FullscreenVendor; 4] = [
        FullscreenVendor::Standard,
        FullscreenVendor::Webkit,
        FullscreenVendor::Moz,
        FullscreenVendor::Ms,
    ];

    /// Element method that enters fullscreen
    pub fn request_method(self) -> &'static str {
        match self {
            FullscreenVendor::Standard => "requestFullscreen",
            FullscreenVendor::Webkit => "webkitRequestFullscreen",
            FullscreenVendor::Moz => "mozRequestFullScreen",
            FullscreenVendor::Ms => "msRequestFullscreen",
        }
    }

    /// Document method that leaves fullscreen
    pub fn exit_method(self) -> &'static str {
        match self {
            FullscreenVendor::Standard => "exitFullscreen",
            FullscreenVendor::Webkit => "webkitExitFullscreen",
            FullscreenVendor::Moz => "mozCancelFullScreen",
            FullscreenVendor::Ms => "msExitFullscreen",
        }
    }

    /// Document property naming the fullscreen element
    pub fn element_property(self) -> &'static str {
        match self {
            FullscreenVendor::Standard => "fullscreenElement",
            FullscreenVendor::Webkit => "webkitFullscreenElement",
            FullscreenVendor::Moz => "mozFullScreenElement",
            FullscreenVendor::Ms => "msFullscreenElement",
        }
    }

    /// Document-level change notification
    pub fn change_event(self) -> &'static str {
        match self {
            FullscreenVendor::Standard => "fullscreenchange",
            FullscreenVendor::Webkit => "webkitfullscreenchange",
            FullscreenVendor::Moz => "mozfullscreenchange",
            FullscreenVendor::Ms => "MSFullscreenChange",
        }
    }
}

/// Document-level fullscreen capability, addressed per vendor
pub trait FullscreenHost {
    /// Whether the host exposes this vendor's API
    fn supports(&self, vendor: FullscreenVendor) -> bool;

    /// Ask for the element with `element_id` to go fullscreen
    fn request(&mut self, vendor: FullscreenVendor, element_id: &str) -> Result<()>;

    /// Leave fullscreen
    fn exit(&mut self, vendor: FullscreenVendor) -> Result<()>;

    /// Id of the element currently fullscreen, if any
    fn fullscreen_element(&self, vendor: FullscreenVendor) -> Option<String>;
}

/// Uniform fullscreen interface over whichever API the host supports
pub struct FullscreenAdapter {
    binding: Option<(FullscreenVendor, Box<dyn FullscreenHost>)>,
}

impl FullscreenAdapter {
    /// Probe `host` and bind to the first supported API
    pub fn detect(host: Box<dyn FullscreenHost>) -> Self {
        let vendor = FullscreenVendor::PROBE_ORDER
            .iter()
            .copied()
            .find(|vendor| host.supports(*vendor));

        match vendor {
            Some(vendor) => {
                info!("Using fullscreen API {}", vendor.request_method());
                Self { binding: Some((vendor, host)) }
            }
            None => {
                info!("No fullscreen API available, fullscreen button is inert");
                Self::unsupported()
            }
        }
    }

    /// Adapter for hosts without any fullscreen API
    pub fn unsupported() -> Self {
        Self { binding: None }
    }

    /// Bound API, if any
    pub fn vendor(&self) -> Option<FullscreenVendor> {
        self.binding.as_ref().map(|(vendor, _)| *vendor)
    }

    /// Whether fullscreen can be requested at all
    pub fn is_supported(&self) -> bool {
        self.binding.is_some()
    }

    /// Change notification name the host should forward to the controller
    pub fn change_event(&self) -> Option<&'static str> {
        self.vendor().map(FullscreenVendor::change_event)
    }

    /// Whether any element is fullscreen
    pub fn is_active(&self) -> bool {
        match &self.binding {
            Some((vendor, host)) => host.fullscreen_element(*vendor).is_some(),
            None => false,
        }
    }

    /// Request fullscreen for `element_id`; returns whether a request was issued
    pub fn request(&mut self, element_id: &str) -> bool {
        let Some((vendor, host)) = self.binding.as_mut() else {
            return false;
        };

        match host.request(*vendor, element_id) {
            Ok(()) => {
                debug!("Requested fullscreen for #{}", element_id);
                true
            }
            Err(e) => {
                warn!("Fullscreen request refused: {}", e);
                false
            }
        }
    }

    /// Leave fullscreen; returns whether an exit was issued
    pub fn exit(&mut self) -> bool {
        let Some((vendor, host)) = self.binding.as_mut() else {
            return false;
        };

        match host.exit(*vendor) {
            Ok(()) => {
                debug!("Exited fullscreen");
                true
            }
            Err(e) => {
                warn!("Fullscreen exit refused: {}", e);
                false
            }
        }
    }

    /// Enter fullscreen on `element_id` or leave it if already active
    pub fn toggle(&mut self, element_id: &str) -> bool {
        if self.is_active() {
            self.exit()
        } else {
            self.request(element_id)
        }
    }
}
