//! Visual identity of the organizational units.
//!
//! Every college code maps to an accent color, a long display name and a logo asset.
//! Unknown codes fall back to [`DEFAULT`], so a lookup always yields an entry.

#[derive(Debug, PartialEq, Eq)]
pub struct BrandingEntry {
    pub code: &'static str,
    /// `#rrggbb` color token.
    pub accent_color: &'static str,
    pub display_name: &'static str,
    pub logo_path: &'static str,
}

pub const DEFAULT: BrandingEntry = BrandingEntry {
    code: "DEFAULT",
    accent_color: "#1e3a8a",
    display_name: "University Scheduling Office",
    logo_path: "assets/logos/university.png",
};

static ENTRIES: [BrandingEntry; 6] = [
    BrandingEntry {
        code: "CCS",
        accent_color: "#f97316",
        display_name: "College of Computer Studies",
        logo_path: "assets/logos/ccs.png",
    },
    BrandingEntry {
        code: "COE",
        accent_color: "#dc2626",
        display_name: "College of Engineering",
        logo_path: "assets/logos/coe.png",
    },
    BrandingEntry {
        code: "CAS",
        accent_color: "#16a34a",
        display_name: "College of Arts and Sciences",
        logo_path: "assets/logos/cas.png",
    },
    BrandingEntry {
        code: "CBA",
        accent_color: "#ca8a04",
        display_name: "College of Business and Accountancy",
        logo_path: "assets/logos/cba.png",
    },
    BrandingEntry {
        code: "CED",
        accent_color: "#2563eb",
        display_name: "College of Education",
        logo_path: "assets/logos/ced.png",
    },
    BrandingEntry {
        code: "CON",
        accent_color: "#db2777",
        display_name: "College of Nursing",
        logo_path: "assets/logos/con.png",
    },
];

static DEFAULT_ENTRY: BrandingEntry = DEFAULT;

/// Resolves a code case-insensitively, ignoring surrounding whitespace. Never fails.
pub fn resolve(code: &str) -> &'static BrandingEntry {
    let code = code.trim().to_uppercase();
    ENTRIES
        .iter()
        .find(|entry| entry.code == code)
        .unwrap_or(&DEFAULT_ENTRY)
}

pub fn is_known(code: &str) -> bool {
    !std::ptr::eq(resolve(code), &DEFAULT_ENTRY)
}

pub fn accent_color(code: &str) -> &'static str {
    resolve(code).accent_color
}

pub fn display_name(code: &str) -> &'static str {
    resolve(code).display_name
}

pub fn logo_path(code: &str) -> &'static str {
    resolve(code).logo_path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_code_falls_back_to_default() {
        assert!(std::ptr::eq(resolve("zzz"), resolve("default")));
        assert_eq!(resolve("zzz"), &DEFAULT);
        assert_eq!(resolve(""), &DEFAULT);
        assert!(!is_known("zzz"));
    }

    #[test]
    fn lookup_ignores_case() {
        assert!(std::ptr::eq(resolve("ccs"), resolve("CCS")));
        assert_eq!(resolve("Ccs").display_name, "College of Computer Studies");
        assert!(std::ptr::eq(resolve(" coe\n"), resolve("COE")));
        assert!(is_known("coe"));
    }

    #[test]
    fn accessors_project_the_entry() {
        assert_eq!(accent_color("cas"), "#16a34a");
        assert_eq!(display_name("CBA"), "College of Business and Accountancy");
        assert_eq!(logo_path("con"), "assets/logos/con.png");
        assert_eq!(display_name("nope"), DEFAULT.display_name);
    }

    #[test]
    fn every_code_is_uppercase_and_unique() {
        let codes: Vec<&str> = ENTRIES.iter().map(|entry| entry.code).collect();
        for code in codes.iter() {
            assert_eq!(code.to_uppercase(), *code);
            assert_eq!(codes.iter().filter(|c| *c == code).count(), 1);
        }
    }
}
