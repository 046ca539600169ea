/// Declares a DTO message: the struct with its wire names, the marker field,
/// a positional constructor, the [`DtoMessage`](crate::message::DtoMessage)
/// and [`DtoField`](crate::message::schema::DtoField) impls and a boolean
/// guard function.
///
/// ```
/// restdto::dto_message! {
///     /// Ping sent by a client.
///     pub struct Ping in "demo" marked "TypPing" {
///         "Seq" => seq: i64,
///     }
///     guard is_ping;
/// }
///
/// assert!(is_ping(&serde_json::json!({ "TypPing": null })));
/// ```
#[macro_export]
macro_rules! dto_message {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident in $package:literal marked $marker:literal {
            $( $(#[$fmeta:meta])* $wire:literal => $field:ident : $ty:ty ),* $(,)?
        }
        guard $guard:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default, ::serde::Serialize, ::serde::Deserialize)]
        $vis struct $name {
            /// Marker key. Only its presence matters, the value is never read.
            #[serde(rename = $marker, default)]
            pub type_marker: ::std::option::Option<::serde_json::Value>,
            $(
                $(#[$fmeta])*
                #[serde(rename = $wire)]
                pub $field: $ty,
            )*
        }

        impl $name {
            #[allow(clippy::too_many_arguments)]
            pub fn new($($field: $ty),*) -> Self {
                Self {
                    type_marker: None,
                    $($field,)*
                }
            }
        }

        impl $crate::message::DtoMessage for $name {
            const PACKAGE: &'static str = $package;
            const NAME: &'static str = stringify!($name);
            const TYPE_ID: &'static str = $marker;

            fn fields() -> ::std::vec::Vec<$crate::message::schema::MessageField> {
                ::std::vec![
                    $(
                        $crate::message::schema::MessageField::new(
                            $wire,
                            <$ty as $crate::message::schema::DtoField>::field_type(),
                        ),
                    )*
                ]
            }
        }

        impl $crate::message::schema::DtoField for $name {
            fn field_type() -> $crate::message::schema::FieldType {
                $crate::message::schema::FieldType::Message(
                    $crate::message::schema::MessageRef::of::<$name>(),
                )
            }
        }

        /// Returns true when `value` is an object carrying the marker key.
        $vis fn $guard(value: &::serde_json::Value) -> bool {
            $crate::message::is_message::<$name>(value)
        }
    };
}
