//! Report sinks

pub mod csv;

pub use csv::{
    save_glue_buckets_csv, save_glue_report_csv, save_policies_csv, write_glue_buckets_csv,
    write_glue_report_csv, write_policies_csv,
};
