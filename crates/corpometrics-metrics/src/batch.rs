//! Arrow `RecordBatch` export for metric tables.
//!
//! Key columns are `Utf8` (ids, names, the lang tag) and `UInt32` (page,
//! sent_idx); counts are `UInt64` with ratios as `Float64`; `n_sentences` is
//! a nullable `UInt64` emitted only for sentence-grained roll-ups. An empty
//! table becomes a zero-row batch with the full schema.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray, UInt32Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

use crate::aggregate::{DocRow, LangRow, PageRow, SentenceRow, Table, UnitCounts};

/// Arrow type of one metric count column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    UInt,
    Float,
}

/// One metric count value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    UInt(u64),
    Float(f64),
}

/// Column projection of a counts payload.
pub trait CountColumns {
    const COLUMNS: &'static [(&'static str, CellType)];

    /// One cell per entry of [`COLUMNS`](Self::COLUMNS), in the same order.
    fn cells(&self) -> Vec<Cell>;
}

impl<C> Table<C>
where
    C: UnitCounts + CountColumns,
    C::Totals: CountColumns,
{
    pub fn to_record_batch(&self) -> Result<RecordBatch, ArrowError> {
        match self {
            Self::Sentence(rows) => sentence_batch(rows),
            Self::Page(rows) => page_batch(rows),
            Self::Doc(rows) => doc_batch(rows),
            Self::Lang(rows) => lang_batch(rows),
        }
    }
}

fn count_fields<T: CountColumns>() -> Vec<Field> {
    T::COLUMNS
        .iter()
        .map(|(name, ty)| {
            let data_type = match ty {
                CellType::UInt => DataType::UInt64,
                CellType::Float => DataType::Float64,
            };
            Field::new(*name, data_type, false)
        })
        .collect()
}

fn count_arrays<T: CountColumns>(items: &[&T]) -> Vec<ArrayRef> {
    let cells: Vec<Vec<Cell>> = items.iter().map(|t| t.cells()).collect();
    T::COLUMNS
        .iter()
        .enumerate()
        .map(|(j, (_, ty))| match ty {
            CellType::UInt => {
                let values: Vec<u64> = cells
                    .iter()
                    .map(|row| match row[j] {
                        Cell::UInt(v) => v,
                        Cell::Float(v) => v as u64,
                    })
                    .collect();
                Arc::new(UInt64Array::from(values)) as ArrayRef
            }
            CellType::Float => {
                let values: Vec<f64> = cells
                    .iter()
                    .map(|row| match row[j] {
                        Cell::Float(v) => v,
                        Cell::UInt(v) => v as f64,
                    })
                    .collect();
                Arc::new(Float64Array::from(values)) as ArrayRef
            }
        })
        .collect()
}

fn string_array<'a>(values: impl Iterator<Item = &'a str>) -> ArrayRef {
    Arc::new(StringArray::from(values.collect::<Vec<_>>()))
}

fn sentence_batch<C>(rows: &[SentenceRow<C>]) -> Result<RecordBatch, ArrowError>
where
    C: CountColumns,
{
    let mut fields = vec![
        Field::new("stimulus_id", DataType::Utf8, false),
        Field::new("stimulus_name", DataType::Utf8, false),
        Field::new("page", DataType::UInt32, false),
        Field::new("sent_idx", DataType::UInt32, false),
    ];
    fields.extend(count_fields::<C>());

    let mut columns: Vec<ArrayRef> = vec![
        string_array(rows.iter().map(|r| r.stimulus_id.as_str())),
        string_array(rows.iter().map(|r| r.stimulus_name.as_str())),
        Arc::new(UInt32Array::from(
            rows.iter().map(|r| r.page).collect::<Vec<_>>(),
        )),
        Arc::new(UInt32Array::from(
            rows.iter().map(|r| r.sent_idx).collect::<Vec<_>>(),
        )),
    ];
    let counts: Vec<&C> = rows.iter().map(|r| &r.counts).collect();
    columns.extend(count_arrays(&counts));

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
}

fn page_batch<T>(rows: &[PageRow<T>]) -> Result<RecordBatch, ArrowError>
where
    T: CountColumns,
{
    let mut fields = vec![
        Field::new("stimulus_id", DataType::Utf8, false),
        Field::new("stimulus_name", DataType::Utf8, false),
        Field::new("page", DataType::UInt32, false),
    ];
    fields.extend(count_fields::<T>());

    let mut columns: Vec<ArrayRef> = vec![
        string_array(rows.iter().map(|r| r.stimulus_id.as_str())),
        string_array(rows.iter().map(|r| r.stimulus_name.as_str())),
        Arc::new(UInt32Array::from(
            rows.iter().map(|r| r.page).collect::<Vec<_>>(),
        )),
    ];
    let totals: Vec<&T> = rows.iter().map(|r| &r.totals).collect();
    columns.extend(count_arrays(&totals));

    if rows.iter().any(|r| r.n_sentences.is_some()) {
        fields.push(Field::new("n_sentences", DataType::UInt64, true));
        columns.push(Arc::new(UInt64Array::from(
            rows.iter().map(|r| r.n_sentences).collect::<Vec<_>>(),
        )));
    }

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
}

fn doc_batch<T>(rows: &[DocRow<T>]) -> Result<RecordBatch, ArrowError>
where
    T: CountColumns,
{
    let mut fields = vec![
        Field::new("stimulus_id", DataType::Utf8, false),
        Field::new("stimulus_name", DataType::Utf8, false),
    ];
    fields.extend(count_fields::<T>());

    let mut columns: Vec<ArrayRef> = vec![
        string_array(rows.iter().map(|r| r.stimulus_id.as_str())),
        string_array(rows.iter().map(|r| r.stimulus_name.as_str())),
    ];
    let totals: Vec<&T> = rows.iter().map(|r| &r.totals).collect();
    columns.extend(count_arrays(&totals));

    if rows.iter().any(|r| r.n_sentences.is_some()) {
        fields.push(Field::new("n_sentences", DataType::UInt64, true));
        columns.push(Arc::new(UInt64Array::from(
            rows.iter().map(|r| r.n_sentences).collect::<Vec<_>>(),
        )));
    }

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
}

fn lang_batch<T>(rows: &[LangRow<T>]) -> Result<RecordBatch, ArrowError>
where
    T: CountColumns,
{
    let mut fields = vec![Field::new("level", DataType::Utf8, false)];
    fields.extend(count_fields::<T>());

    let mut columns: Vec<ArrayRef> = vec![string_array(rows.iter().map(|r| r.level.as_str()))];
    let totals: Vec<&T> = rows.iter().map(|r| &r.totals).collect();
    columns.extend(count_arrays(&totals));

    if rows.iter().any(|r| r.n_sentences.is_some()) {
        fields.push(Field::new("n_sentences", DataType::UInt64, true));
        columns.push(Arc::new(UInt64Array::from(
            rows.iter().map(|r| r.n_sentences).collect::<Vec<_>>(),
        )));
    }

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
}
