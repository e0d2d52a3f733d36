mod reader;
mod types;
mod writer;

pub use reader::RecordReader;
pub use types::Record;
pub use writer::RecordWriter;
