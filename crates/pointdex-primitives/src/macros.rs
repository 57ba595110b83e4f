#[macro_export]
macro_rules! number_kind_registry_entries {
    ($macro:ident $(, @args $($args:tt)+ )?) => {
        $macro! {
            $(
                @args $($args)+;
            )?
            @entries
            (
                Date,
                Bits64,
                label = "date",
                is_floating = false,
                is_temporal = true
            ),
            (
                Float32,
                Bits32,
                label = "float32",
                is_floating = true,
                is_temporal = false
            ),
            (
                Float64,
                Bits64,
                label = "float64",
                is_floating = true,
                is_temporal = false
            ),
            (
                Int32,
                Bits32,
                label = "int32",
                is_floating = false,
                is_temporal = false
            ),
            (
                Int64,
                Bits64,
                label = "int64",
                is_floating = false,
                is_temporal = false
            ),
        }
    };
}

#[macro_export]
macro_rules! number_kind_registry {
    ($macro:ident) => {
        $crate::number_kind_registry_entries!($macro)
    };
    ($macro:ident, $($args:tt)+) => {
        $crate::number_kind_registry_entries!($macro, @args $($args)+)
    };
}

macro_rules! metadata_from_registry {
    ( @args $kind:expr; @entries $( ($number:ident, $width:ident, label = $label:expr, is_floating = $is_floating:expr, is_temporal = $is_temporal:expr) ),* $(,)? ) => {
        match $kind {
            $(
                $crate::NumberKind::$number => $crate::NumberMetadata {
                    width: $crate::BitWidth::$width,
                    label: $label,
                    is_floating: $is_floating,
                    is_temporal: $is_temporal,
                },
            )*
        }
    };
}

macro_rules! all_kinds_from_registry {
    ( @entries $( ($number:ident, $width:ident, label = $label:expr, is_floating = $is_floating:expr, is_temporal = $is_temporal:expr) ),* $(,)? ) => {
        [ $( $crate::NumberKind::$number ),* ]
    };
}

macro_rules! kind_from_label_registry {
    ( @args $label_in:expr; @entries $( ($number:ident, $width:ident, label = $label:expr, is_floating = $is_floating:expr, is_temporal = $is_temporal:expr) ),* $(,)? ) => {{
        let label_in: &str = $label_in;
        $(
            if label_in.eq_ignore_ascii_case($label) {
                return Some($crate::NumberKind::$number);
            }
        )*
        None
    }};
}
