use std::future::Future;
use std::sync::Arc;

use crate::MagicLinkApi;
use crate::MagicLinkError;
use crate::Result;
use crate::collaborators::BrowserOpener;
use crate::collaborators::UsageRecorder;
use crate::destination::SubPage;

/// Drive `op` to completion and swallow its failure. Errors are logged, the caller only ever
/// sees `()`.
pub async fn best_effort<Fut>(op: Fut)
where
    Fut: Future<Output = Result<()>>,
{
    if let Err(e) = op.await {
        log::error!("Error generating dashboard magic link: {e}");
    }
}

/// Opens dashboard pages in the browser on behalf of UI actions. None of the `open` calls
/// can fail from the caller's point of view.
#[derive(Clone)]
pub struct MagicLinkService {
    pub api: MagicLinkApi,
    browser: Arc<dyn BrowserOpener>,
    usage: Arc<dyn UsageRecorder>,
}

impl MagicLinkService {
    pub fn new(
        api: MagicLinkApi,
        browser: Arc<dyn BrowserOpener>,
        usage: Arc<dyn UsageRecorder>,
    ) -> Self {
        Self {
            api,
            browser,
            usage,
        }
    }

    async fn open_dashboard(
        &self,
        sub_page: SubPage,
        source: Option<&str>,
        usage_event: Option<&str>,
    ) {
        best_effort(async {
            let link = self
                .api
                .build_dashboard_link(sub_page.as_str(), source)
                .await?;
            if let Err(e) = self.browser.open_external(&link) {
                log::warn!("failed to open browser for {sub_page}: {e:?}");
            }
            if let Some(event) = usage_event {
                self.usage.record_feature_usage(event);
            }
            Ok::<_, MagicLinkError>(())
        })
        .await
    }

    /// Open the prime onboarding in the browser. `refl` is a referral tag for analytics.
    pub async fn link_to_prime(&self, refl: &str) {
        self.open_dashboard(SubPage::Prime, Some(refl), None).await
    }

    pub async fn open_widget_themes_magic_link(&self) {
        self.open_dashboard(SubPage::WidgetThemes, None, None).await
    }

    pub async fn open_donation_settings(&self) {
        self.open_dashboard(
            SubPage::DonationSettings,
            None,
            Some("openDonationSettings"),
        )
        .await
    }

    pub async fn open_advanced_alert_testing(&self) {
        self.open_dashboard(
            SubPage::AdvancedTesting,
            None,
            Some("openAdvancedAlertTesting"),
        )
        .await
    }
}
