//! Rule tables for the two filter modes.
//!
//! Order matters only for which rule is reported by `first_match`; the
//! interestingness verdict is "no rule matches".

use strum_macros::EnumIter;

/// What a rule is meant to catch. Used in decision logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum RuleCategory {
    /// Analytics, tracking, ads, social widgets
    Analytics,
    /// Public CDNs and polyfill services
    Cdn,
    /// Well-known frameworks and libraries
    Library,
    /// Minified builds
    Minified,
    /// Vendor, plugin, theme, docs and dist directories
    VendorPath,
    /// Fonts, images, stylesheets
    StaticAsset,
}

impl RuleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCategory::Analytics => "analytics",
            RuleCategory::Cdn => "cdn",
            RuleCategory::Library => "library",
            RuleCategory::Minified => "minified",
            RuleCategory::VendorPath => "vendor path",
            RuleCategory::StaticAsset => "static asset",
        }
    }
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

use RuleCategory::*;

pub(super) const STRICT_RULES: &[(RuleCategory, &str)] = &[
    (Analytics, r"segment\.com"),
    (Analytics, r"google-analytics\.com"),
    (Analytics, r"googletagmanager\.com"),
    (Analytics, r"facebook\.net"),
    (Analytics, r"twitter\.com"),
    (Analytics, r"linkedin\.com"),
    (Analytics, r"hotjar\.com"),
    (Library, r"jquery(?:\.min)?\.js"),
    (Library, r"bootstrap(?:\.min)?\.js"),
    (Cdn, r"cdn\.jsdelivr\.net"),
    (Cdn, r"cdn\.cloudflare\.com"),
    (Cdn, r"polyfill\.io"),
    (Analytics, r"\bads?\."),
    (Analytics, r"track(?:ing)?\.js"),
    (Analytics, r"analytics\.js"),
    (Analytics, r"gtm\.js"),
    (Analytics, r"optimizely\.com"),
    (Minified, r"\.min\.js$"),
    (Library, r"webpack"),
    (Library, r"react"),
    (Library, r"vue"),
    (Library, r"angular"),
    (VendorPath, r"/vendor/"),
    (VendorPath, r"/plugins/"),
    (VendorPath, r"/docs/"),
    (VendorPath, r"/themes/"),
    (VendorPath, r"/dist/"),
    (
        StaticAsset,
        r"\.(?:woff2?|ttf|ttc|otf|eot|svg|png|jpe?g|gif|css)(?:[?#].*)?$",
    ),
];

pub(super) const RELAXED_RULES: &[(RuleCategory, &str)] = &[
    (Analytics, r"segment\.com"),
    (Analytics, r"google-analytics\.com"),
    (Analytics, r"googletagmanager"),
    (Analytics, r"facebook\.com"),
    (Analytics, r"twitter\.com"),
    (Analytics, r"linkedin\.com"),
    (Analytics, r"hotspot|hotjar"),
    (Library, r"jquery(?:\.com$|\.js)"),
    (Library, r"bootstrap\.js"),
    (Cdn, r"cdn\.js\."),
    (Cdn, r"cloudflare\.com"),
    (Cdn, r"polyfill\.io"),
    (Analytics, r"\bads?\."),
    (Analytics, r"track(?:ing)?\.js"),
    (Analytics, r"analytics\.js"),
    (Analytics, r"gtm\.js"),
    (Analytics, r"optimizely\.com"),
    (Library, r"webpack"),
    (Library, r"react"),
    (Library, r"vue"),
    (Library, r"angular"),
    (StaticAsset, r"\.(?:woff2?|ttf|eot|svg|png|jpg)\.js$"),
];
