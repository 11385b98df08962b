//! # Listing Page Extraction
//!
//! Turns the raw HTML of an Aptoide listing page into [`AppMetadata`].
//!
//! Each field has its own function returning `Option<String>`. They never
//! share state and never fail: a template change on the source site makes the
//! affected fields come back `None` while the rest keep working.
//!
//! Apart from the app name, every field is read from the page's visible text
//! as produced by [`page_text`], where adjacent text nodes are glued together
//! (`Developer (CN):WhatsApp Inc.Organization (O):...`). That is why most
//! fields take "the rest of the line" and then cut it at the next known label.

use crate::html::{normalize_ws, page_text, strip_tags, without_code};
use crate::model::AppMetadata;
use once_cell::sync::Lazy;
use regex::Regex;

/// Build a regex from a static pattern.
fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("extraction regex should compile - patterns are static")
}

static H1: Lazy<Regex> = Lazy::new(|| re(r"(?is)<h1\b([^>]*)>(.*?)</h1\s*>"));
static NAME_CLASS: Lazy<Regex> =
    Lazy::new(|| re(r#"(?i)class\s*=\s*["'][^"']*(?:app-name|appName|app_name)"#));

static SIZE: Lazy<Regex> = Lazy::new(|| re(r"(?i)Size:\s*(\d+\.?\d*\s*[KMGT]B)"));
static DOWNLOADS: Lazy<Regex> = Lazy::new(|| re(r"(?i)Downloads?:\s*([\d.]+[KMB]?)"));
static VERSION: Lazy<Regex> = Lazy::new(|| re(r"(?i)Version\s*:?\s*(\d+\.[\d.]+)"));
static RELEASE_DATE: Lazy<Regex> =
    Lazy::new(|| re(r"Release Date:\s*(\d{4}-\d{2}-\d{2}\s+\d{2}:\d{2}:\d{2})"));
static MIN_SCREEN: Lazy<Regex> = Lazy::new(|| re(r"(?i)Min Screen:\s*(\w+)"));
static SUPPORTED_CPU: Lazy<Regex> = Lazy::new(|| re(r"(?i)Supported CPU:\s*([^\n]+)"));
static PACKAGE_ID: Lazy<Regex> =
    Lazy::new(|| re(r"Package ID:\s*([a-zA-Z0-9._]+?)(?:SHA1|[^a-zA-Z0-9._]|$)"));
static SHA1_SIGNATURE: Lazy<Regex> =
    Lazy::new(|| re(r"(?i)SHA1 Signature:\s*([A-F0-9:]{59})"));
static DEVELOPER_CN: Lazy<Regex> = Lazy::new(|| re(r"(?i)Developer\s*\(CN\):\s*([^\n]+)"));
static ORGANIZATION: Lazy<Regex> = Lazy::new(|| re(r"(?i)Organization\s*\(O\):\s*([^\n]+)"));
static LOCAL: Lazy<Regex> = Lazy::new(|| re(r"(?i)Local\s*\(L\):\s*([^\n]+)"));
static COUNTRY: Lazy<Regex> = Lazy::new(|| re(r"(?i)Country\s*\(C\):\s*([^\n]+)"));
static STATE_CITY: Lazy<Regex> = Lazy::new(|| re(r"(?i)State/City\s*\(ST\):\s*([^\n]+)"));

// Where a glued-together value stops.
static CPU_END: Lazy<Regex> = Lazy::new(|| re(r"Package ID|SHA1|Signature|\s{3,}"));
static DEVELOPER_END: Lazy<Regex> = Lazy::new(|| re(r"Organization|Local|\s{2,}"));
static ORGANIZATION_END: Lazy<Regex> = Lazy::new(|| re(r"Local|Country|\s{2,}"));
static LOCAL_END: Lazy<Regex> = Lazy::new(|| re(r"Country|State|\s{2,}"));
static COUNTRY_END: Lazy<Regex> = Lazy::new(|| re(r"State|Local|\s{2,}"));
// A question word ends the state when it is glued to the value
// ("CaliforniaWhatsApp") or stands as a word of its own ("Hobart How to").
// "Canberra" is neither.
static STATE_CITY_END: Lazy<Regex> = Lazy::new(|| {
    re(r"[A-Za-z](What|How|Can|Why|Where)|(\b(?:What|How|Can|Why|Where)(?:\s|$)|Package ID|SHA1|FAQ|Download|Ratings|About|Description|\?|Latest|\s{2,})")
});
static QUESTION_WORD: Lazy<Regex> = Lazy::new(|| re(r"What|How|Can|Why"));

static COUNTRY_CODE: Lazy<Regex> = Lazy::new(|| re(r"\b([A-Z]{2})\b"));

const FAQ_PHRASES: [&str; 7] = [
    "what is",
    "how to",
    "can i",
    "download",
    "app?",
    "facebook app",
    "whatsapp",
];
const MAX_STATE_CITY_LEN: usize = 50;

/// Extract every known field from a listing page. Total over all inputs.
pub fn extract(page: &str) -> AppMetadata {
    let text = page_text(page);

    AppMetadata {
        name: extract_name(page),
        size: extract_size(&text),
        downloads: extract_downloads(&text),
        version: extract_version(&text),
        release_date: extract_release_date(&text),
        min_screen: extract_min_screen(&text),
        supported_cpu: extract_supported_cpu(&text),
        package_id: extract_package_id(&text),
        sha1_signature: extract_sha1_signature(&text),
        developer_cn: extract_developer_cn(&text),
        organization: extract_organization(&text),
        local: extract_local(&text),
        country: extract_country(&text),
        state_city: extract_state_city(&text),
    }
}

/// `None` for empty values and the placeholders the site uses for "unknown".
fn clean(value: &str) -> Option<String> {
    match value.trim() {
        "" | "-" | "None" => None,
        v => Some(v.to_string()),
    }
}

fn capture<'t>(pattern: &Regex, text: &'t str) -> Option<&'t str> {
    pattern
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Everything before the first match of `end`.
fn cut_at<'t>(value: &'t str, end: &Regex) -> &'t str {
    match end.find(value) {
        Some(m) => &value[..m.start()],
        None => value,
    }
}

/// Text after `label`, trimmed, cut at the next label.
fn labelled_value(text: &str, label: &Regex, end: &Regex) -> Option<String> {
    let raw = capture(label, text)?.trim();
    clean(cut_at(raw, end))
}

/// Text of the `<h1>` carrying the app-name class, else of the first `<h1>`.
/// Works on markup since the class attribute is gone from page text; headings
/// inside comments or scripts are ignored.
pub fn extract_name(page: &str) -> Option<String> {
    let markup = without_code(page);
    let headings: Vec<_> = H1.captures_iter(&markup).collect();
    let heading = headings
        .iter()
        .find(|c| NAME_CLASS.is_match(&c[1]))
        .or_else(|| headings.first())?;
    clean(&strip_tags(&heading[2]))
}

pub fn extract_size(text: &str) -> Option<String> {
    capture(&SIZE, text).and_then(clean)
}

pub fn extract_downloads(text: &str) -> Option<String> {
    capture(&DOWNLOADS, text).and_then(clean)
}

pub fn extract_version(text: &str) -> Option<String> {
    capture(&VERSION, text).and_then(clean)
}

pub fn extract_release_date(text: &str) -> Option<String> {
    capture(&RELEASE_DATE, text).and_then(clean)
}

/// The screen class is glued to the next label ("SMALLSupported CPU:"), so
/// a trailing `SUPPORTED` is dropped after upper-casing.
pub fn extract_min_screen(text: &str) -> Option<String> {
    let screen = capture(&MIN_SCREEN, text)?.to_uppercase();
    let screen = screen.strip_suffix("SUPPORTED").unwrap_or(&screen);
    clean(screen)
}

pub fn extract_supported_cpu(text: &str) -> Option<String> {
    let raw = capture(&SUPPORTED_CPU, text)?.trim();
    clean(&normalize_ws(cut_at(raw, &CPU_END)))
}

pub fn extract_package_id(text: &str) -> Option<String> {
    capture(&PACKAGE_ID, text).and_then(clean)
}

pub fn extract_sha1_signature(text: &str) -> Option<String> {
    capture(&SHA1_SIGNATURE, text).and_then(|sig| clean(&sig.to_uppercase()))
}

pub fn extract_developer_cn(text: &str) -> Option<String> {
    labelled_value(text, &DEVELOPER_CN, &DEVELOPER_END)
}

pub fn extract_organization(text: &str) -> Option<String> {
    labelled_value(text, &ORGANIZATION, &ORGANIZATION_END)
}

pub fn extract_local(text: &str) -> Option<String> {
    labelled_value(text, &LOCAL, &LOCAL_END)
}

/// Two-letter codes are normalized to upper case. Longer values yield the
/// first standalone two-capital word in them, or the value as-is.
pub fn extract_country(text: &str) -> Option<String> {
    let country = labelled_value(text, &COUNTRY, &COUNTRY_END)?;

    if country.chars().count() == 2 && country.chars().all(char::is_alphabetic) {
        return Some(country.to_uppercase());
    }
    match capture(&COUNTRY_CODE, &country) {
        Some(code) => Some(code.to_string()),
        None => Some(country),
    }
}

/// The state is usually followed by the page's FAQ block, so the value is cut
/// at the first FAQ or section keyword. A remainder that still reads like FAQ
/// text must be plain words up to the next question word, or it is dropped.
pub fn extract_state_city(text: &str) -> Option<String> {
    let raw = capture(&STATE_CITY, text)?.trim();
    let state = clean(cut_state_city(raw))?;

    let lower = state.to_lowercase();
    let state = if FAQ_PHRASES.iter().any(|p| lower.contains(p)) {
        leading_place_name(&state)?
    } else {
        state
    };

    (state.chars().count() < MAX_STATE_CITY_LEN).then_some(state)
}

fn cut_state_city(value: &str) -> &str {
    let cut = STATE_CITY_END
        .captures(value)
        .and_then(|c| c.get(1).or_else(|| c.get(2)))
        .map_or(value.len(), |m| m.start());
    &value[..cut]
}

/// Letters and spaces up to the first question word after the first
/// character, or up to the end.
fn leading_place_name(value: &str) -> Option<String> {
    let end = QUESTION_WORD
        .find_iter(value)
        .map(|m| m.start())
        .find(|&start| start > 0)
        .unwrap_or(value.len());
    let head = &value[..end];

    if head
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
    {
        clean(head)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../tests/fixtures/whatsapp.html");

    #[test]
    fn test_fixture_fields() {
        let m = extract(FIXTURE);

        assert_eq!(m.name.as_deref(), Some("WhatsApp Messenger"));
        assert_eq!(m.size.as_deref(), Some("54.3 MB"));
        assert_eq!(m.downloads.as_deref(), Some("5B"));
        assert_eq!(m.version.as_deref(), Some("2.24.8.85"));
        assert_eq!(m.release_date.as_deref(), Some("2024-04-22 10:15:43"));
        assert_eq!(m.min_screen.as_deref(), Some("SMALL"));
        assert_eq!(
            m.supported_cpu.as_deref(),
            Some("arm64-v8a, armeabi-v7a, x86, x86_64")
        );
        assert_eq!(m.package_id.as_deref(), Some("com.whatsapp"));
        assert_eq!(
            m.sha1_signature.as_deref(),
            Some("38:A0:F7:D5:05:FE:18:FE:C6:4F:BF:34:3E:CA:AA:F3:10:DB:D7:99")
        );
        assert_eq!(m.developer_cn.as_deref(), Some("WhatsApp Inc."));
        assert_eq!(m.organization.as_deref(), Some("WhatsApp Inc."));
        assert_eq!(m.local.as_deref(), Some("Mountain View"));
        assert_eq!(m.country.as_deref(), Some("US"));
        assert_eq!(m.state_city.as_deref(), Some("CA"));
        assert_eq!(m.populated_count(), 14);
    }

    #[test]
    fn test_empty_and_malformed_input() {
        assert!(extract("").is_empty());
        assert!(extract("<<<>>> &&&; <h1 <script").is_empty());
        assert!(extract("\u{0}\u{FFFD}}{][").is_empty());
        assert!(extract(&"<div>".repeat(1000)).is_empty());
    }

    #[test]
    fn test_missing_field_leaves_others_intact() {
        let full = extract(FIXTURE);
        let labels: [(&str, fn(&AppMetadata) -> &Option<String>); 13] = [
            ("Size:", |m| &m.size),
            ("Downloads:", |m| &m.downloads),
            ("Version:", |m| &m.version),
            ("Release Date:", |m| &m.release_date),
            ("Min Screen:", |m| &m.min_screen),
            ("Supported CPU:", |m| &m.supported_cpu),
            ("Package ID:", |m| &m.package_id),
            ("SHA1 Signature:", |m| &m.sha1_signature),
            ("Developer (CN):", |m| &m.developer_cn),
            ("Organization (O):", |m| &m.organization),
            ("Local (L):", |m| &m.local),
            ("Country (C):", |m| &m.country),
            ("State/City (ST):", |m| &m.state_city),
        ];

        for (label, field) in labels {
            let page = FIXTURE.replace(label, "");
            let partial = extract(&page);

            assert_eq!(field(&partial), &None, "{label} removed but still found");
            assert_eq!(
                partial.populated_count(),
                full.populated_count() - 1,
                "removing {label} affected other fields"
            );
        }
    }

    #[test]
    fn test_name_prefers_app_name_class() {
        let page = r#"<h1 class="logo">Aptoide</h1><h1 class="appName big">Telegram</h1>"#;
        assert_eq!(extract_name(page).as_deref(), Some("Telegram"));
    }

    #[test]
    fn test_name_falls_back_to_first_heading() {
        let page = "<H1 id=\"x\">\n  Signal <small>Private&nbsp;Messenger</small>\n</H1><h1>Other</h1>";
        assert_eq!(extract_name(page).as_deref(), Some("Signal Private Messenger"));
        assert_eq!(extract_name("<h1>  </h1>"), None);
        assert_eq!(extract_name("<h1>-</h1>"), None);
        assert_eq!(extract_name("<h2>Nope</h2>"), None);
    }

    #[test]
    fn test_placeholder_values_are_null() {
        let text = "Developer (CN): -\nOrganization (O): None\nLocal (L):   \n";
        assert_eq!(extract_developer_cn(text), None);
        assert_eq!(extract_organization(text), None);
        assert_eq!(extract_local(text), None);
    }

    #[test]
    fn test_size_and_downloads_stay_textual() {
        assert_eq!(extract_size("size: 1.2 gb").as_deref(), Some("1.2 gb"));
        assert_eq!(extract_size("Size: 120KB").as_deref(), Some("120KB"));
        assert_eq!(extract_size("Size: unknown"), None);
        assert_eq!(extract_downloads("Download: 100M").as_deref(), Some("100M"));
        assert_eq!(extract_downloads("Downloads: 1.5K+").as_deref(), Some("1.5K"));
    }

    #[test]
    fn test_version_and_release_date() {
        assert_eq!(extract_version("Version 3.1.0").as_deref(), Some("3.1.0"));
        assert_eq!(extract_version("version: 7").as_deref(), None);
        assert_eq!(
            extract_release_date("Release Date: 2023-01-05   08:00:01").as_deref(),
            Some("2023-01-05   08:00:01")
        );
        assert_eq!(extract_release_date("Release Date: 05/01/2023"), None);
    }

    #[test]
    fn test_min_screen_suffix() {
        assert_eq!(extract_min_screen("Min Screen: normal\n").as_deref(), Some("NORMAL"));
        assert_eq!(
            extract_min_screen("Min Screen:LARGESupported CPU:x86").as_deref(),
            Some("LARGE")
        );
        assert_eq!(extract_min_screen("Min Screen:Supported CPU:x86"), None);
    }

    #[test]
    fn test_supported_cpu_cut_and_collapsed() {
        assert_eq!(
            extract_supported_cpu("Supported CPU: arm64-v8a,  x86   Package ID: a.b").as_deref(),
            Some("arm64-v8a, x86")
        );
        assert_eq!(extract_supported_cpu("Supported CPU: -\n"), None);
    }

    #[test]
    fn test_package_id_stops_at_next_label() {
        assert_eq!(
            extract_package_id("Package ID:org.telegram.messengerSHA1 Signature:").as_deref(),
            Some("org.telegram.messenger")
        );
        assert_eq!(extract_package_id("Package ID: com.x_y.z\n").as_deref(), Some("com.x_y.z"));
        assert_eq!(extract_package_id("package id: com.x"), None);
    }

    #[test]
    fn test_sha1_is_uppercased() {
        let sig = "38:a0:f7:d5:05:fe:18:fe:c6:4f:bf:34:3e:ca:aa:f3:10:db:d7:99";
        assert_eq!(
            extract_sha1_signature(&format!("SHA1 Signature: {sig}")).as_deref(),
            Some("38:A0:F7:D5:05:FE:18:FE:C6:4F:BF:34:3E:CA:AA:F3:10:DB:D7:99")
        );
        assert_eq!(extract_sha1_signature("SHA1 Signature: 38:A0:F7"), None);
    }

    #[test]
    fn test_certificate_fields_split_on_wide_gaps() {
        let text = "Developer (CN): Telegram FZ-LLC    Organization (O): Telegram FZ-LLC\n\
                    Local (L): Dubai  Country (C): AE\n";
        assert_eq!(extract_developer_cn(text).as_deref(), Some("Telegram FZ-LLC"));
        assert_eq!(extract_organization(text).as_deref(), Some("Telegram FZ-LLC"));
        assert_eq!(extract_local(text).as_deref(), Some("Dubai"));
        assert_eq!(extract_country(text).as_deref(), Some("AE"));
    }

    #[test]
    fn test_country_normalization() {
        assert_eq!(extract_country("Country (C): us\n").as_deref(), Some("US"));
        assert_eq!(
            extract_country("Country (C): USA (US)\n").as_deref(),
            Some("US")
        );
        assert_eq!(
            extract_country("Country (C): Deutschland\n").as_deref(),
            Some("Deutschland")
        );
        assert_eq!(extract_country("Country (C): -\n"), None);
    }

    #[test]
    fn test_name_ignores_headings_in_scripts_and_comments() {
        let page = r#"<script>var t = "<h1>Decoy</h1>";</script><h1>Real App</h1>"#;
        assert_eq!(extract(page).name.as_deref(), Some("Real App"));

        let page = "<!-- <h1>Old Title</h1> --><h1>Real App</h1>";
        assert_eq!(extract(page).name.as_deref(), Some("Real App"));
    }

    #[test]
    fn test_state_city_cut_at_faq() {
        assert_eq!(
            extract_state_city("State/City (ST):CaliforniaWhat is WhatsApp?").as_deref(),
            Some("California")
        );
        assert_eq!(
            extract_state_city("State/City (ST): New South Wales\n").as_deref(),
            Some("New South Wales")
        );
        assert_eq!(
            extract_state_city("State/City (ST): Canberra\n").as_deref(),
            Some("Canberra")
        );
        assert_eq!(extract_state_city("State/City (ST): FAQ\n"), None);
    }

    #[test]
    fn test_state_city_glued_to_app_title() {
        assert_eq!(
            extract_state_city("State/City (ST):CaliforniaWhatsApp Messenger").as_deref(),
            Some("California")
        );
        assert_eq!(
            extract_state_city("State/City (ST):CAWhat is WhatsApp?").as_deref(),
            Some("CA")
        );
        assert_eq!(
            extract_state_city("State/City (ST): Tasmania How to install\n").as_deref(),
            Some("Tasmania")
        );
        assert_eq!(extract_state_city("State/City (ST): What is this app\n"), None);
    }

    #[test]
    fn test_state_city_faq_remainder() {
        // "how to" survives the keyword cut because it is lower case.
        assert_eq!(
            extract_state_city("State/City (ST): Bavaria how to install 2\n"),
            None
        );
        assert_eq!(
            extract_state_city("State/City (ST): Bavaria how to install\n").as_deref(),
            Some("Bavaria how to install")
        );
        assert_eq!(
            extract_state_city("State/City (ST): Ontario whatsapp mirror\n").as_deref(),
            Some("Ontario whatsapp mirror")
        );
        assert_eq!(extract_state_city("State/City (ST): 99 can i download\n"), None);
    }

    #[test]
    fn test_state_city_length_limit() {
        let long = "A".repeat(MAX_STATE_CITY_LEN);
        assert_eq!(extract_state_city(&format!("State/City (ST): {long}\n")), None);
        let ok = "A".repeat(MAX_STATE_CITY_LEN - 1);
        assert_eq!(
            extract_state_city(&format!("State/City (ST): {ok}\n")).as_deref(),
            Some(ok.as_str())
        );
    }
}
