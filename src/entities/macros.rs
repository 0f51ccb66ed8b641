//! Macros for reducing boilerplate when defining entities
//!
//! These macros generate the repetitive [`Entity`](crate::core::Entity) and
//! [`Data`](crate::core::Data) implementations for structs that keep their
//! identifier in an `id: i64` field.

/// Implement [`Entity`](crate::core::Entity) for a struct with an `id: i64` field
///
/// # Example
/// ```rust,ignore
/// impl_entity!(Rule, "rule", "rules");
/// ```
#[macro_export]
macro_rules! impl_entity {
    ($type:ty, $singular:expr, $plural:expr) => {
        impl $crate::core::Entity for $type {
            fn resource_name() -> &'static str {
                $plural
            }

            fn entity_type() -> &'static str {
                $singular
            }

            fn id(&self) -> i64 {
                self.id
            }

            fn set_id(&mut self, id: i64) {
                self.id = id;
            }
        }
    };
}

/// Implement [`Entity`](crate::core::Entity) and [`Data`](crate::core::Data),
/// using the given field as the entity's name
///
/// Append `unique` to make the store reject duplicate names.
///
/// # Example
/// ```rust,ignore
/// impl_data_entity!(Country, "country", "countries", name);
/// impl_data_entity!(PaymentMethod, "payment", "payments", name, unique);
/// ```
#[macro_export]
macro_rules! impl_data_entity {
    ($type:ty, $singular:expr, $plural:expr, $name_field:ident) => {
        $crate::impl_entity!($type, $singular, $plural);

        impl $crate::core::Data for $type {
            fn name(&self) -> &str {
                &self.$name_field
            }
        }
    };
    ($type:ty, $singular:expr, $plural:expr, $name_field:ident, unique) => {
        $crate::impl_entity!($type, $singular, $plural);

        impl $crate::core::Data for $type {
            fn name(&self) -> &str {
                &self.$name_field
            }

            fn unique_name() -> bool {
                true
            }
        }
    };
}
