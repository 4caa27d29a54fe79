// ═══════════════════════════════════════════════════════════════════
// Error Tests: Display strings and From conversions for CoreError
// ═══════════════════════════════════════════════════════════════════

use finance_ledger_core::errors::CoreError;

mod display {
    use super::*;

    #[test]
    fn serialization() {
        let e = CoreError::Serialization("bad float".into());
        assert_eq!(e.to_string(), "Serialization error: bad float");
    }

    #[test]
    fn deserialization() {
        let e = CoreError::Deserialization("unexpected EOF".into());
        assert_eq!(e.to_string(), "Deserialization error: unexpected EOF");
    }

    #[test]
    fn unsupported_version() {
        assert_eq!(
            CoreError::UnsupportedVersion(7).to_string(),
            "Unsupported snapshot version: 7"
        );
    }

    #[test]
    fn storage() {
        let e = CoreError::Storage("quota exceeded".into());
        assert_eq!(e.to_string(), "Storage error: quota exceeded");
    }

    #[test]
    fn file_io() {
        let e = CoreError::FileIO("permission denied".into());
        assert_eq!(e.to_string(), "File I/O error: permission denied");
    }

    #[test]
    fn validation() {
        let e = CoreError::ValidationError("amount must be non-negative".into());
        assert_eq!(e.to_string(), "Validation failed: amount must be non-negative");
    }

    #[test]
    fn invalid_month_key() {
        let e = CoreError::InvalidMonthKey("2025-13".into());
        assert_eq!(e.to_string(), "Invalid month key '2025-13': expected YYYY-MM");
    }

    #[test]
    fn not_loaded() {
        assert_eq!(CoreError::NotLoaded.to_string(), "Ledger has not finished loading");
    }
}

mod conversions {
    use super::*;

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let e: CoreError = io.into();
        assert!(matches!(e, CoreError::FileIO(ref msg) if msg.contains("nope")));
    }

    #[test]
    fn from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let e: CoreError = err.into();
        assert!(matches!(e, CoreError::Deserialization(_)));
    }

    #[test]
    fn question_mark_converts() {
        fn read() -> Result<(), CoreError> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        assert!(matches!(read(), Err(CoreError::FileIO(_))));
    }

    #[test]
    fn is_std_error() {
        let e: Box<dyn std::error::Error + Send + Sync> = Box::new(CoreError::NotLoaded);
        assert_eq!(e.to_string(), "Ledger has not finished loading");
    }
}
