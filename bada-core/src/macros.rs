#[macro_export]
/// Generates a String similar to output of `dbg` but without printing
macro_rules! format_dbg {
    ($dbg_expr:expr) => {
        format!(
            "[{}:{}] {}: {:?}",
            file!(),
            line!(),
            stringify!($dbg_expr),
            $dbg_expr
        )
    };
    () => {
        format!("[{}:{}]", file!(), line!())
    };
}

#[macro_export]
/// Checks that every array passed in has the same length as the first one,
/// bailing with the offending expression otherwise
macro_rules! ensure_same_len {
    ($first:expr, $($rest:expr),+ $(,)?) => {
        $(
            anyhow::ensure!(
                $first.len() == $rest.len(),
                "{}\nlength {} does not match length {} of `{}`",
                $crate::format_dbg!(),
                $rest.len(),
                $first.len(),
                stringify!($first)
            );
        )+
    };
}

/// Declares a per-slot record together with a struct-of-arrays table holding
/// one column per record field.  Rows are added and removed only through
/// `push` and `remove`, which touch every column.
#[macro_export]
macro_rules! columnar_record {
    (
        $(#[$rec_meta:meta])*
        pub struct $rec:ident in $table:ident {
            $(
                $(#[$field_meta:meta])*
                pub $field:ident: $ty:ty,
            )*
        }
    ) => {
        $(#[$rec_meta])*
        pub struct $rec {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        #[doc = concat!("Columns of [", stringify!($rec), "], one row per fleet slot")]
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $table {
            rows: usize,
            $(pub $field: $crate::imports::Array1<$ty>,)*
        }

        impl $table {
            pub fn len(&self) -> usize {
                self.rows
            }

            pub fn is_empty(&self) -> bool {
                self.rows == 0
            }

            /// Appends `rec` as a new last row
            pub fn push(&mut self, rec: &$rec) -> anyhow::Result<()> {
                $(self.$field
                    .push($crate::imports::Axis(0), $crate::imports::aview0(&rec.$field))?;)*
                self.rows += 1;
                Ok(())
            }

            /// Removes row `slot`, shifting every later row down by one
            pub fn remove(&mut self, slot: usize) -> anyhow::Result<()> {
                anyhow::ensure!(
                    slot < self.rows,
                    $crate::error::PerformanceError::SlotOutOfRange { slot, len: self.rows }
                );
                $(self.$field = $crate::utils::remove_index(&self.$field, slot)?;)*
                self.rows -= 1;
                Ok(())
            }

            /// Copies row `slot` out of the table.  Panics if `slot` is out of range.
            pub fn row(&self, slot: usize) -> $rec {
                $rec {
                    $($field: self.$field[slot].clone(),)*
                }
            }

            pub fn get(&self, slot: usize) -> Option<$rec> {
                (slot < self.rows).then(|| self.row(slot))
            }
        }
    };
}
