//! Geolocation portal.
//!
//! The GeoClue helper reports through success/error paths the way a
//! callback-based geolocation API does; both are folded into one awaited
//! outcome through the single-resolution adapter, so a dispatch yields
//! exactly one result and one diagnostics entry.

use std::sync::Arc;

use async_trait::async_trait;
use portal_bridge_core::Outcome;

use crate::error::PortalResult;
use crate::os::geo;
use crate::single_shot::single_resolution;
use crate::traits::{Portal, PortalContext, Probe};

pub struct LocationPortal;

#[async_trait]
impl Portal for LocationPortal {
    fn id(&self) -> &'static str {
        "location"
    }

    async fn probe(&self) -> Probe {
        if geo::helper_path().is_some() {
            Probe::Available
        } else {
            Probe::Unsupported(
                "Geolocation unsupported: GeoClue helper not installed.".to_string(),
            )
        }
    }

    async fn invoke(&self, _ctx: &PortalContext) -> PortalResult<Outcome> {
        let Some(helper) = geo::helper_path() else {
            return Ok(Outcome::Unsupported(
                "Geolocation unsupported: GeoClue helper not installed.".to_string(),
            ));
        };

        let (resolver, fix) = single_resolution();
        let resolver = Arc::new(resolver);
        tokio::spawn({
            let resolver = Arc::clone(&resolver);
            async move {
                let result = geo::query_fix(&helper).await;
                resolver.resolve(result);
            }
        });

        match fix.await {
            Ok(Ok(fix)) => Ok(Outcome::Success(format!(
                "Location bridged: {:.4}, {:.4}",
                fix.latitude, fix.longitude
            ))),
            Ok(Err(message)) => {
                let text = format!("Location error: {message}");
                if geo::is_denial(&message) {
                    Ok(Outcome::Denied(text))
                } else {
                    Ok(Outcome::Failed(text))
                }
            }
            Err(_) => Ok(Outcome::Failed(
                "Location error: fix source dropped without resolving".to_string(),
            )),
        }
    }
}
