/// Declares a closed set of values with a stable transport string and a
/// display label.
///
/// Generated items: `ALL` in declaration order, `as_str`, `label`, `cell`
/// (a [`crate::CellValue::Choice`] ranked by declaration order), `Display`
/// (label) and `FromStr` accepting either the transport value or the label,
/// case-insensitively.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($kind:literal) {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => ($value:literal, $label:literal)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),+
        }

        impl $name {
            /// Every value in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the stable transport value.
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            /// Returns the display label.
            #[must_use]
            pub fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            /// Returns the table cell for this value.
            #[must_use]
            pub fn cell(&self) -> $crate::CellValue {
                let rank = Self::ALL
                    .iter()
                    .position(|candidate| candidate == self)
                    .unwrap_or_default();
                $crate::CellValue::Choice(rank, self.as_str(), self.label())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = opsdesk_core::AppError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let normalized = value.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| {
                        candidate.as_str().eq_ignore_ascii_case(normalized)
                            || candidate.label().eq_ignore_ascii_case(normalized)
                    })
                    .ok_or_else(|| {
                        opsdesk_core::AppError::Validation(format!(
                            "unknown {} '{value}'",
                            $kind
                        ))
                    })
            }
        }
    };
}

pub(crate) use choice_enum;
