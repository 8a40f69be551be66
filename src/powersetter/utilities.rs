//! Static ZIP code to utility-name lookup table.
//!
//! PowerSetter resolves the serving utility from the entered ZIP code before
//! rendering rate cards. The mapping below covers the ZIP codes the crawler
//! is pointed at; anything else resolves to [`UNKNOWN_UTILITY`].

/// Fallback utility name for ZIP codes not present in the table.
pub const UNKNOWN_UTILITY: &str = "Unknown Utility";

/// ZIP code to utility display name, fixed at build time.
pub static UTILITIES: &[(&str, &str)] = &[
    ("60021", "ComEd"),
    ("62634", "Ameren"),
    ("01746", "Eversource - NSTAR"),
    ("01035", "Eversource - WMECO"),
    ("44052", "Ohio Edison"),
    ("45255", "Duke Energy"),
    ("43771", "AEP - Ohio Power"),
    ("45710", "AEP Columbus"),
    ("43609", "Toledo Edison"),
    ("44026", "The Illuminating Company"),
    ("17017", "PPL Electric"),
    ("17329", "Met-Ed"),
    ("19122", "PECO Energy"),
    ("16637", "Penelec"),
    ("08001", "Atlantic City Electric"),
    ("07083", "Public Service Electric & Gas (PSEG)"),
    ("07885", "JCPL"),
    ("01069", "Nat Grid - MA"),
];

/// Resolves the utility display name for a ZIP code.
///
/// ZIP codes are matched as strings, so leading zeros are significant.
pub fn utility_for_zip(zip: &str) -> &'static str {
    UTILITIES.iter().find(|(z, _)| *z == zip).map(|(_, u)| *u).unwrap_or(UNKNOWN_UTILITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_zip_codes() {
        assert_eq!(utility_for_zip("60021"), "ComEd");
        assert_eq!(utility_for_zip("19122"), "PECO Energy");
        assert_eq!(utility_for_zip("45255"), "Duke Energy");
    }

    #[test]
    fn test_leading_zero_zip_codes() {
        assert_eq!(utility_for_zip("01746"), "Eversource - NSTAR");
        assert_eq!(utility_for_zip("08001"), "Atlantic City Electric");
        assert_eq!(utility_for_zip("07885"), "JCPL");
    }

    #[test]
    fn test_unknown_zip_code() {
        assert_eq!(utility_for_zip("99999"), UNKNOWN_UTILITY);
        assert_eq!(utility_for_zip(""), UNKNOWN_UTILITY);
        // Numeric equality is not string equality: "8001" is not "08001"
        assert_eq!(utility_for_zip("8001"), UNKNOWN_UTILITY);
    }

    #[test]
    fn test_table_size() {
        assert_eq!(UTILITIES.len(), 18);
    }
}
