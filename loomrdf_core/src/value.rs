/*!
Typed values coerced from a literal node's canonical lexical form, per its XSD datatype.
*/

#![allow(clippy::module_name_repetitions)]

///
/// A value decoded from a literal's lexical form according to its datatype.
///
#[derive(Clone, Debug, PartialEq)]
pub enum TypedValue {
    Boolean(bool),
    Long(i64),
    Int(i32),
    Short(i16),
    Byte(i8),
    UnsignedLong(u64),
    UnsignedInt(u32),
    UnsignedShort(u16),
    UnsignedByte(u8),
    Float(f32),
    Double(f64),
    #[cfg(feature = "decimal_types")]
    Decimal(rust_decimal::Decimal),
    String(String),
    #[cfg(feature = "binary_types")]
    Binary(Vec<u8>),
}

///
/// Identifies a `TypedValue` variant without carrying a value, used to select a coercion target
/// in `value_as`.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypedValueKind {
    Boolean,
    Long,
    Int,
    Short,
    Byte,
    UnsignedLong,
    UnsignedInt,
    UnsignedShort,
    UnsignedByte,
    Float,
    Double,
    #[cfg(feature = "decimal_types")]
    Decimal,
    String,
    #[cfg(feature = "binary_types")]
    Binary,
}

/// Maps a literal's datatype IRI to the `TypedValueKind` its lexical form should be parsed as, or
/// `None` for a datatype `value()` does not cover (binary types go through `Node::decode` instead).
pub(crate) fn kind_for_datatype(datatype: &str) -> Option<TypedValueKind> {
    use crate::node::*;
    Some(match datatype {
        XSD_BOOLEAN => TypedValueKind::Boolean,
        XSD_LONG => TypedValueKind::Long,
        XSD_INT => TypedValueKind::Int,
        XSD_SHORT => TypedValueKind::Short,
        XSD_BYTE => TypedValueKind::Byte,
        XSD_UNSIGNED_LONG => TypedValueKind::UnsignedLong,
        XSD_UNSIGNED_INT => TypedValueKind::UnsignedInt,
        XSD_UNSIGNED_SHORT => TypedValueKind::UnsignedShort,
        XSD_UNSIGNED_BYTE => TypedValueKind::UnsignedByte,
        XSD_FLOAT => TypedValueKind::Float,
        XSD_DOUBLE => TypedValueKind::Double,
        #[cfg(feature = "decimal_types")]
        XSD_DECIMAL => TypedValueKind::Decimal,
        XSD_STRING => TypedValueKind::String,
        _ => return None,
    })
}

/// Parses a literal's lexical form as `kind`, per the XSD lexical-space grammar for each type.
pub(crate) fn parse_lexical_form(text: &str, kind: TypedValueKind) -> Option<TypedValue> {
    match kind {
        TypedValueKind::Boolean => match text {
            "true" | "1" => Some(TypedValue::Boolean(true)),
            "false" | "0" => Some(TypedValue::Boolean(false)),
            _ => None,
        },
        TypedValueKind::Long => text.parse().ok().map(TypedValue::Long),
        TypedValueKind::Int => text.parse().ok().map(TypedValue::Int),
        TypedValueKind::Short => text.parse().ok().map(TypedValue::Short),
        TypedValueKind::Byte => text.parse().ok().map(TypedValue::Byte),
        TypedValueKind::UnsignedLong => text.parse().ok().map(TypedValue::UnsignedLong),
        TypedValueKind::UnsignedInt => text.parse().ok().map(TypedValue::UnsignedInt),
        TypedValueKind::UnsignedShort => text.parse().ok().map(TypedValue::UnsignedShort),
        TypedValueKind::UnsignedByte => text.parse().ok().map(TypedValue::UnsignedByte),
        TypedValueKind::Float => parse_xsd_double(text).map(|v| v as f32).map(TypedValue::Float),
        TypedValueKind::Double => parse_xsd_double(text).map(TypedValue::Double),
        #[cfg(feature = "decimal_types")]
        TypedValueKind::Decimal => text.parse().ok().map(TypedValue::Decimal),
        TypedValueKind::String => Some(TypedValue::String(text.to_string())),
        #[cfg(feature = "binary_types")]
        TypedValueKind::Binary => None,
    }
}

/// Parses an xsd:float/xsd:double lexical form, including the `NaN`/`INF`/`-INF` literals Rust's
/// own `f64::from_str` does not accept.
fn parse_xsd_double(text: &str) -> Option<f64> {
    match text {
        "NaN" => Some(f64::NAN),
        "INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        _ => text.parse().ok(),
    }
}

impl TypedValue {
    pub fn kind(&self) -> TypedValueKind {
        match self {
            Self::Boolean(_) => TypedValueKind::Boolean,
            Self::Long(_) => TypedValueKind::Long,
            Self::Int(_) => TypedValueKind::Int,
            Self::Short(_) => TypedValueKind::Short,
            Self::Byte(_) => TypedValueKind::Byte,
            Self::UnsignedLong(_) => TypedValueKind::UnsignedLong,
            Self::UnsignedInt(_) => TypedValueKind::UnsignedInt,
            Self::UnsignedShort(_) => TypedValueKind::UnsignedShort,
            Self::UnsignedByte(_) => TypedValueKind::UnsignedByte,
            Self::Float(_) => TypedValueKind::Float,
            Self::Double(_) => TypedValueKind::Double,
            #[cfg(feature = "decimal_types")]
            Self::Decimal(_) => TypedValueKind::Decimal,
            Self::String(_) => TypedValueKind::String,
            #[cfg(feature = "binary_types")]
            Self::Binary(_) => TypedValueKind::Binary,
        }
    }

    /// Returns this value as an `f64`, when the conversion is always exact or `lossy` permits
    /// precision reduction.
    fn as_f64(&self, lossy: bool) -> Option<f64> {
        match self {
            Self::Boolean(_) | Self::String(_) => None,
            #[cfg(feature = "binary_types")]
            Self::Binary(_) => None,
            Self::Long(v) => Some(*v as f64),
            Self::Int(v) => Some(*v as f64),
            Self::Short(v) => Some(*v as f64),
            Self::Byte(v) => Some(*v as f64),
            Self::UnsignedLong(v) => Some(*v as f64),
            Self::UnsignedInt(v) => Some(*v as f64),
            Self::UnsignedShort(v) => Some(*v as f64),
            Self::UnsignedByte(v) => Some(*v as f64),
            Self::Float(v) => Some(*v as f64),
            Self::Double(v) => Some(*v),
            #[cfg(feature = "decimal_types")]
            Self::Decimal(v) => {
                use rust_decimal::prelude::ToPrimitive;
                if lossy {
                    v.to_f64()
                } else {
                    v.to_f64().filter(|f| rust_decimal::Decimal::try_from(*f).ok() == Some(*v))
                }
            }
        }
    }

    fn as_i128(&self) -> Option<i128> {
        match self {
            Self::Long(v) => Some(*v as i128),
            Self::Int(v) => Some(*v as i128),
            Self::Short(v) => Some(*v as i128),
            Self::Byte(v) => Some(*v as i128),
            Self::UnsignedLong(v) => Some(*v as i128),
            Self::UnsignedInt(v) => Some(*v as i128),
            Self::UnsignedShort(v) => Some(*v as i128),
            Self::UnsignedByte(v) => Some(*v as i128),
            _ => None,
        }
    }

    /// Coerces this value to `target`. Without `lossy`, only exactly-representable conversions
    /// succeed (integer widening, integer-to-float when exactly representable). With `lossy`,
    /// precision reduction (double to float) and decimal-to-integer truncation are permitted.
    pub fn coerce(&self, target: TypedValueKind, lossy: bool) -> Option<TypedValue> {
        if self.kind() == target {
            return Some(self.clone());
        }
        match target {
            TypedValueKind::String => Some(TypedValue::String(self.to_lexical_form())),
            TypedValueKind::Boolean => match self {
                Self::Boolean(b) => Some(TypedValue::Boolean(*b)),
                _ => None,
            },
            TypedValueKind::Float => self
                .as_f64(lossy)
                .and_then(|v| if lossy || (v as f32) as f64 == v { Some(v as f32) } else { None })
                .map(TypedValue::Float),
            TypedValueKind::Double => self.as_f64(lossy).map(TypedValue::Double),
            #[cfg(feature = "decimal_types")]
            TypedValueKind::Decimal => {
                if let Some(i) = self.as_i128() {
                    rust_decimal::Decimal::try_from(i).ok().map(TypedValue::Decimal)
                } else {
                    self.as_f64(lossy)
                        .and_then(|v| rust_decimal::Decimal::try_from(v).ok())
                        .map(TypedValue::Decimal)
                }
            }
            TypedValueKind::Long => self.coerce_to_int::<i64>(lossy).map(TypedValue::Long),
            TypedValueKind::Int => self.coerce_to_int::<i32>(lossy).map(TypedValue::Int),
            TypedValueKind::Short => self.coerce_to_int::<i16>(lossy).map(TypedValue::Short),
            TypedValueKind::Byte => self.coerce_to_int::<i8>(lossy).map(TypedValue::Byte),
            TypedValueKind::UnsignedLong => {
                self.coerce_to_uint::<u64>(lossy).map(TypedValue::UnsignedLong)
            }
            TypedValueKind::UnsignedInt => {
                self.coerce_to_uint::<u32>(lossy).map(TypedValue::UnsignedInt)
            }
            TypedValueKind::UnsignedShort => {
                self.coerce_to_uint::<u16>(lossy).map(TypedValue::UnsignedShort)
            }
            TypedValueKind::UnsignedByte => {
                self.coerce_to_uint::<u8>(lossy).map(TypedValue::UnsignedByte)
            }
            #[cfg(feature = "binary_types")]
            TypedValueKind::Binary => None,
        }
    }

    fn coerce_to_int<T>(&self, lossy: bool) -> Option<T>
    where
        T: TryFrom<i128>,
    {
        let value = self.as_i128().or_else(|| {
            if lossy {
                self.as_f64(true).map(|f| f.trunc() as i128)
            } else {
                None
            }
        })?;
        T::try_from(value).ok()
    }

    fn coerce_to_uint<T>(&self, lossy: bool) -> Option<T>
    where
        T: TryFrom<i128>,
    {
        self.coerce_to_int(lossy)
    }

    /// Renders this value back to its XSD canonical lexical form.
    pub fn to_lexical_form(&self) -> String {
        match self {
            Self::Boolean(b) => b.to_string(),
            Self::Long(v) => v.to_string(),
            Self::Int(v) => v.to_string(),
            Self::Short(v) => v.to_string(),
            Self::Byte(v) => v.to_string(),
            Self::UnsignedLong(v) => v.to_string(),
            Self::UnsignedInt(v) => v.to_string(),
            Self::UnsignedShort(v) => v.to_string(),
            Self::UnsignedByte(v) => v.to_string(),
            Self::Float(v) => crate::node::format_xsd_double(*v as f64),
            Self::Double(v) => crate::node::format_xsd_double(*v),
            #[cfg(feature = "decimal_types")]
            Self::Decimal(v) => v.normalize().to_string(),
            Self::String(s) => s.clone(),
            #[cfg(feature = "binary_types")]
            Self::Binary(bytes) => base64::Engine::encode(
                &base64::engine::general_purpose::STANDARD,
                bytes,
            ),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_widening_succeeds_without_lossy() {
        let v = TypedValue::Byte(12);
        assert_eq!(v.coerce(TypedValueKind::Long, false), Some(TypedValue::Long(12)));
    }

    #[test]
    fn narrowing_without_lossy_fails_on_overflow() {
        let v = TypedValue::Long(1000);
        assert_eq!(v.coerce(TypedValueKind::Byte, false), None);
    }

    #[test]
    fn narrowing_with_lossy_truncates_float() {
        let v = TypedValue::Double(3.9);
        assert_eq!(v.coerce(TypedValueKind::Int, true), Some(TypedValue::Int(3)));
    }

    #[test]
    fn narrowing_without_lossy_rejects_float() {
        let v = TypedValue::Double(3.9);
        assert_eq!(v.coerce(TypedValueKind::Int, false), None);
    }

    #[test]
    fn kind_for_datatype_recognizes_xsd_int_and_rejects_unknown_iris() {
        assert_eq!(kind_for_datatype(crate::node::XSD_INT), Some(TypedValueKind::Int));
        assert_eq!(kind_for_datatype("http://example.com/not-xsd"), None);
    }

    #[test]
    fn parse_lexical_form_accepts_xsd_double_special_values() {
        assert!(matches!(
            parse_lexical_form("NaN", TypedValueKind::Double),
            Some(TypedValue::Double(v)) if v.is_nan()
        ));
        assert_eq!(parse_lexical_form("INF", TypedValueKind::Double), Some(TypedValue::Double(f64::INFINITY)));
        assert_eq!(parse_lexical_form("-INF", TypedValueKind::Float), Some(TypedValue::Float(f32::NEG_INFINITY)));
    }
}
