//! Helper macro for declaring port error enums with ergonomic constructors.
//!
//! Each variant gets a snake_case constructor whose fields accept anything
//! convertible into the declared type, so adapters can write
//! `RecordStoreError::query("timeout")` instead of building the struct.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum GatewayProbeError {
            Offline => "gateway offline",
            Rejected { reason: String } => "gateway rejected the call: {reason}",
            Throttled { retry_after_secs: u64 } => "retry in {retry_after_secs}s",
            Status { code: u16, body: String } => "status {code}: {body}",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(GatewayProbeError::offline(), GatewayProbeError::Offline);
        assert_eq!(GatewayProbeError::offline().to_string(), "gateway offline");
    }

    #[test]
    fn string_fields_accept_borrowed_text() {
        let err = GatewayProbeError::rejected("quota");
        assert_eq!(err.to_string(), "gateway rejected the call: quota");
    }

    #[test]
    fn numeric_fields_keep_their_type() {
        let err = GatewayProbeError::throttled(30_u64);
        assert_eq!(err, GatewayProbeError::Throttled { retry_after_secs: 30 });
    }

    #[test]
    fn mixed_fields_are_positional() {
        let err = GatewayProbeError::status(409_u16, "duplicate");
        assert_eq!(err.to_string(), "status 409: duplicate");
    }
}
