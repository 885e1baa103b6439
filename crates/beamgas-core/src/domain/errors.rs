pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisErrorCategory {
    Success,
    InputValidationError,
    InputNotFoundError,
    SchemaError,
    UnknownProcessError,
    OutputWriteError,
    InternalError,
}

impl AnalysisErrorCategory {
    pub const fn exit_placeholder(self) -> ExitPlaceholder {
        match self {
            Self::Success => ExitPlaceholder {
                exit_code: 0,
                category_name: "Success",
            },
            Self::InputValidationError => ExitPlaceholder {
                exit_code: 2,
                category_name: "InputValidationError",
            },
            Self::InputNotFoundError => ExitPlaceholder {
                exit_code: 3,
                category_name: "InputNotFoundError",
            },
            Self::SchemaError => ExitPlaceholder {
                exit_code: 4,
                category_name: "SchemaError",
            },
            Self::UnknownProcessError => ExitPlaceholder {
                exit_code: 5,
                category_name: "UnknownProcessError",
            },
            Self::OutputWriteError => ExitPlaceholder {
                exit_code: 6,
                category_name: "OutputWriteError",
            },
            Self::InternalError => ExitPlaceholder {
                exit_code: 7,
                category_name: "InternalError",
            },
        }
    }

    pub const fn exit_code(self) -> i32 {
        self.exit_placeholder().exit_code
    }

    pub const fn category_name(self) -> &'static str {
        self.exit_placeholder().category_name
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitPlaceholder {
    pub exit_code: i32,
    pub category_name: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} [{code}] {message}", .category.category_name())]
pub struct AnalysisError {
    category: AnalysisErrorCategory,
    code: &'static str,
    message: String,
}

impl AnalysisError {
    pub fn new(
        category: AnalysisErrorCategory,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            code,
            message: message.into(),
        }
    }

    pub fn input_validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(AnalysisErrorCategory::InputValidationError, code, message)
    }

    pub fn input_not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(AnalysisErrorCategory::InputNotFoundError, code, message)
    }

    pub fn schema(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(AnalysisErrorCategory::SchemaError, code, message)
    }

    pub fn unknown_process(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(AnalysisErrorCategory::UnknownProcessError, code, message)
    }

    pub fn output_write(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(AnalysisErrorCategory::OutputWriteError, code, message)
    }

    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(AnalysisErrorCategory::InternalError, code, message)
    }

    pub const fn category(&self) -> AnalysisErrorCategory {
        self.category
    }

    pub const fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        let severity = if self.category.is_fatal() {
            "ERROR"
        } else {
            "INFO"
        };
        format!("{}: [{}] {}", severity, self.code, self.message)
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        self.category
            .is_fatal()
            .then(|| format!("FATAL EXIT CODE: {}", self.exit_code()))
    }
}

#[cfg(test)]
mod tests {
    use super::{AnalysisError, AnalysisErrorCategory};

    #[test]
    fn exit_mapping_is_stable() {
        let cases = [
            (AnalysisErrorCategory::Success, 0, "Success"),
            (
                AnalysisErrorCategory::InputValidationError,
                2,
                "InputValidationError",
            ),
            (
                AnalysisErrorCategory::InputNotFoundError,
                3,
                "InputNotFoundError",
            ),
            (AnalysisErrorCategory::SchemaError, 4, "SchemaError"),
            (
                AnalysisErrorCategory::UnknownProcessError,
                5,
                "UnknownProcessError",
            ),
            (
                AnalysisErrorCategory::OutputWriteError,
                6,
                "OutputWriteError",
            ),
            (AnalysisErrorCategory::InternalError, 7, "InternalError"),
        ];

        for (category, exit_code, name) in cases {
            let placeholder = category.exit_placeholder();
            assert_eq!(placeholder.exit_code, exit_code);
            assert_eq!(placeholder.category_name, name);
        }
    }

    #[test]
    fn fatal_error_renders_diagnostic_lines() {
        let error = AnalysisError::unknown_process(
            "PROCESS.UNREGISTERED",
            "process type 12 subtype 9 is not in the registry",
        );

        assert_eq!(error.exit_code(), 5);
        assert_eq!(
            error.diagnostic_line(),
            "ERROR: [PROCESS.UNREGISTERED] process type 12 subtype 9 is not in the registry"
        );
        assert_eq!(
            error.fatal_exit_line().as_deref(),
            Some("FATAL EXIT CODE: 5")
        );
        assert_eq!(
            error.to_string(),
            "UnknownProcessError [PROCESS.UNREGISTERED] process type 12 subtype 9 is not in the registry"
        );
    }
}
