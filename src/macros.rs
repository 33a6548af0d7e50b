//! macros used by delicious

/// implement [`Validate`](crate::config::validate::Validate) for a config struct
///
/// every listed field is optional, missing fields are skipped and present
/// ones have to pass their check
#[macro_export]
macro_rules! validator {
    ($struct_name:ty, $( $field:ident => $requirement:expr, $err_msg:expr );* $(;)? ) => {
        impl Validate for $struct_name {
            fn validate(&self) -> Result<(), Vec<String>> {
                let mut errors: Vec<String> = Vec::new();

                $(
                    if let Some(ref value) = self.$field {
                        if !($requirement)(value) {
                            errors.push(format!("{}: {}", stringify!($field), $err_msg));
                        }
                    }
                )*

                if errors.is_empty() {
                    Ok(())
                } else {
                    Err(errors)
                }
            }
        }
    };
}

/// get a config value, falling back to the built-in default
///
/// # Examples
///
/// ```
/// use delicious::getopt;
///
/// let base_url: String = getopt!(api.base_url);
/// assert!(base_url.starts_with("http"));
/// ```
#[macro_export]
macro_rules! getopt {
    () => {
        $crate::config::instance::config()
    };

    ($field:ident) => {{
        $crate::config::instance::get_or_default(
            |c| c.$field.clone(),
            $crate::config::options::DeliciousCfg::default()
                .$field
                .expect(concat!("Default value missing for: ", stringify!($field))),
        )
    }};

    ($lvl1:ident . $field:ident) => {{
        $crate::config::instance::get_or_default(
            |c| c.$lvl1.as_ref().and_then(|sub| sub.$field.clone()),
            $crate::config::options::DeliciousCfg::default()
                .$lvl1
                .and_then(|sub| sub.$field)
                .expect(concat!(
                    "Default value missing for: ",
                    stringify!($lvl1),
                    ".",
                    stringify!($field)
                )),
        )
    }};
}
