//! `define_port_error!`: thiserror enums with snake_case constructors for
//! every variant, so adapters can write `DocumentStoreError::io(err.to_string())`.

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
    define_port_error! {
        pub enum SampleError {
            Missing { name: String } => "{name} is missing",
            Truncated { name: String, bytes: usize } => "{name} truncated after {bytes} bytes",
            Offline => "backend offline",
        }
    }

    #[test]
    fn string_fields_accept_str() {
        let err = SampleError::missing("about.txt");
        assert_eq!(err.to_string(), "about.txt is missing");
        assert_eq!(
            err,
            SampleError::Missing {
                name: "about.txt".to_owned()
            }
        );
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = SampleError::truncated("notes.md", 12_usize);
        assert_eq!(err.to_string(), "notes.md truncated after 12 bytes");
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(SampleError::offline(), SampleError::Offline);
        assert_eq!(SampleError::offline().to_string(), "backend offline");
    }
}
