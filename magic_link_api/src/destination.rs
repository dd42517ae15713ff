//! Routing from a logical dashboard destination to the URL that reaches it.
//!
//! Most destinations land on the generic magic dashboard entry point, which forwards the
//! browser to `r` after consuming the login token. A destination that needs a different
//! landing page gets an entry in [`CARVE_OUTS`] instead of a branch in the link builder.
//!
//! Every query value, the login token included, goes through the same percent-encoder. Tokens
//! made of unreserved characters appear byte for byte; a token such as `dG9r+ZW4=` is emitted
//! as `dG9r%2BZW4%3D`, which a query-decoding server reads back as the original token.

use std::fmt;
use std::str::FromStr;

use percent_encoding::AsciiSet;
use percent_encoding::CONTROLS;
use percent_encoding::utf8_percent_encode;

/// Bytes escaped inside a query value. `/` stays readable so `settings/donation-settings`
/// is emitted as is.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkTemplate {
    /// `https://{host}/slobs/magic/dashboard?login_token={token}&r={sub_page}`
    Dashboard,
    /// `https://{host}{path}?login_token={token}`, a fixed page outside the dashboard.
    Static { path: &'static str },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    pub template: LinkTemplate,
    pub uses_token: bool,
    pub uses_referral: bool,
}

pub const DASHBOARD_ROUTE: Route = Route {
    template: LinkTemplate::Dashboard,
    uses_token: true,
    uses_referral: true,
};

// multistream settings don't exist on the dashboard yet, send people to the guide
pub const CARVE_OUTS: &[(&str, Route)] = &[(
    "multistream",
    Route {
        template: LinkTemplate::Static {
            path: "/content-hub/post/how-to-multistream-the-ultimate-guide-to-multistreaming",
        },
        uses_token: true,
        uses_referral: false,
    },
)];

pub fn route_for(sub_page: &str) -> Route {
    CARVE_OUTS
        .iter()
        .find(|(name, _)| *name == sub_page)
        .map(|(_, route)| *route)
        .unwrap_or(DASHBOARD_ROUTE)
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

impl Route {
    /// Format the final link. Pure, the token must already have been fetched.
    pub fn format(&self, host: &str, token: &str, sub_page: &str, source: Option<&str>) -> String {
        let mut params = vec![];
        if self.uses_token {
            params.push(format!("login_token={}", encode(token)));
        }
        let path = match self.template {
            LinkTemplate::Dashboard => {
                params.push(format!("r={}", encode(sub_page)));
                "/slobs/magic/dashboard"
            }
            LinkTemplate::Static { path } => path,
        };
        if self.uses_referral
            && let Some(source) = source.filter(|s| !s.is_empty())
        {
            params.push(format!("refl={}", encode(source)));
        }
        if params.is_empty() {
            format!("https://{host}{path}")
        } else {
            format!("https://{host}{path}?{}", params.join("&"))
        }
    }
}

/// Shorthand for `route_for(sub_page).format(..)`.
pub fn format_link(host: &str, token: &str, sub_page: &str, source: Option<&str>) -> String {
    route_for(sub_page).format(host, token, sub_page, source)
}

/// Destinations the application links to by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubPage {
    Prime,
    WidgetThemes,
    DonationSettings,
    AdvancedTesting,
    Multistream,
}

impl SubPage {
    pub const ALL: [SubPage; 5] = [
        SubPage::Prime,
        SubPage::WidgetThemes,
        SubPage::DonationSettings,
        SubPage::AdvancedTesting,
        SubPage::Multistream,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubPage::Prime => "prime",
            SubPage::WidgetThemes => "widgetthemes",
            SubPage::DonationSettings => "settings/donation-settings",
            SubPage::AdvancedTesting => "advancedtesting",
            SubPage::Multistream => "multistream",
        }
    }
}

impl fmt::Display for SubPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubPage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        SubPage::ALL
            .into_iter()
            .find(|page| page.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown dashboard destination: {s}"))
    }
}
