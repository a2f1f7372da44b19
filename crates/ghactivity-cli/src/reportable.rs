use anyhow::Result;

/// A trait for things that can be output as a document.
///
/// This trait is used to factor output-related code, such as friendly handling of buffering, into
/// one place.
pub trait Reportable {
    type Format;

    fn report<W: std::io::Write>(&self, format: Self::Format, writer: W) -> Result<()>;
}

/// Write `reportable` to `writer` in the given format.
///
/// A closed pipe on the other end, e.g., from piping to `head`, is not treated as an error.
pub fn write_report<R: Reportable, W: std::io::Write>(
    reportable: &R,
    format: R::Format,
    writer: W,
) -> Result<()> {
    match reportable.report(format, writer) {
        Ok(()) => Ok(()),
        Err(e) => match e.downcast_ref::<std::io::Error>() {
            Some(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
            _ => Err(e),
        },
    }
}
