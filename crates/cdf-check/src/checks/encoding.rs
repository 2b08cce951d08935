//! Data encoding check.

use cdf_format::CdfFile;

use crate::issue::Issue;

pub fn check(file: &CdfFile) -> Vec<Issue> {
    match file.file_descriptor() {
        Some(cdr) if cdr.encoding.is_msb() => Vec::new(),
        Some(cdr) => vec![Issue::EncodingNotMsb {
            code: cdr.encoding.code(),
            name: cdr.encoding.name().to_string(),
        }],
        None => vec![Issue::MissingFileDescriptor],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdf_format::fixture::FixtureBuilder;

    fn encoded(code: i32) -> Vec<Issue> {
        check(&CdfFile::from_bytes(&FixtureBuilder::new().encoding(code).build()).unwrap())
    }

    #[test]
    fn test_msb_encodings_pass() {
        for code in [1, 2, 5, 7, 9, 12] {
            assert!(encoded(code).is_empty(), "encoding {code}");
        }
    }

    #[test]
    fn test_lsb_encoding_flagged() {
        assert_eq!(
            encoded(6),
            vec![Issue::EncodingNotMsb {
                code: 6,
                name: "IBMPC_ENCODING".into()
            }]
        );
    }

    #[test]
    fn test_missing_file_descriptor() {
        let data = FixtureBuilder::new().without_file_descriptor().build();
        let file = CdfFile::from_bytes(&data).unwrap();
        assert_eq!(check(&file), vec![Issue::MissingFileDescriptor]);
    }
}
