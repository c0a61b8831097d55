//! CSV report writer.
//!
//! The report is written to a temporary file next to the destination and
//! moved into place once every byte is on disk. The finished file carries
//! the permissions a plain create-or-truncate would have left.

use std::fs::{self, Permissions};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{ExportError, ExportResult};

/// Writes a header line and one line per row to `path`.
///
/// Fields are comma separated; fields containing a comma, a quote or a line
/// break are quoted, with embedded quotes doubled. Lines end with CRLF.
/// Any existing file at `path` is replaced, keeping its permissions; a
/// symlink at `path` is written through. Returns the number of rows
/// written, not counting the header.
///
/// # Errors
///
/// Returns `ExportError::RowArity` if a row's length differs from the
/// header's, and `ExportError::Write` if the destination cannot be written.
/// In both cases the destination is left as it was.
pub fn write_report<I>(path: &Path, header: &[&str], rows: I) -> ExportResult<usize>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let target = resolve_target(path)?;
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let tmp = temp_file_in(dir, &target).map_err(|e| ExportError::write(path, e))?;

    let mut count = 0;
    {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_writer(tmp.as_file());

        writer
            .write_record(header)
            .map_err(|e| csv_failure(path, e))?;
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != header.len() {
                return Err(ExportError::RowArity {
                    row: index + 1,
                    expected: header.len(),
                    found: row.len(),
                });
            }
            writer.write_record(&row).map_err(|e| csv_failure(path, e))?;
            count += 1;
        }
        writer.flush().map_err(|e| ExportError::write(path, e))?;
    }

    tmp.as_file()
        .sync_all()
        .map_err(|e| ExportError::write(path, e))?;
    tmp.persist(&target)
        .map_err(|e| ExportError::write(path, e.error))?;

    debug!(path = %target.display(), rows = count, "Wrote report");
    Ok(count)
}

/// Follows a symlink at `path` so the rename replaces its target.
fn resolve_target(path: &Path) -> ExportResult<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            let link = fs::read_link(path).map_err(|e| ExportError::write(path, e))?;
            Ok(match path.parent() {
                Some(parent) if link.is_relative() => parent.join(link),
                _ => link,
            })
        }
        _ => Ok(path.to_path_buf()),
    }
}

/// Creates the temporary report with the destination's eventual permissions.
///
/// An existing file keeps its mode. A new file gets 0o666, which the kernel
/// masks with the process umask when the file is opened.
fn temp_file_in(dir: &Path, target: &Path) -> std::io::Result<NamedTempFile> {
    let existing = fs::metadata(target).ok().map(|meta| meta.permissions());

    let mut builder = tempfile::Builder::new();
    builder.prefix(".calextremes-").suffix(".tmp");
    if let Some(perms) = report_permissions(existing.as_ref()) {
        builder.permissions(perms);
    }
    let tmp = builder.tempfile_in(dir)?;

    if let Some(perms) = existing {
        tmp.as_file().set_permissions(perms)?;
    }
    Ok(tmp)
}

#[cfg(unix)]
fn report_permissions(existing: Option<&Permissions>) -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;

    Some(
        existing
            .cloned()
            .unwrap_or_else(|| Permissions::from_mode(0o666)),
    )
}

#[cfg(not(unix))]
fn report_permissions(_existing: Option<&Permissions>) -> Option<Permissions> {
    None
}

/// Keeps the report path on I/O failures raised while writing records.
fn csv_failure(path: &Path, err: csv::Error) -> ExportError {
    if err.is_io_error() {
        ExportError::write(path, std::io::Error::other(err))
    } else {
        ExportError::Csv(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: [&str; 3] = ["Name", "When", "Note"];

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    fn read_back(path: &Path) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn header_only_when_no_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");

        let count = write_report(&path, &HEADER, Vec::new()).unwrap();
        assert_eq!(count, 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Name,When,Note\r\n");
    }

    #[test]
    fn plain_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");

        let rows = vec![row(&["a", "1", ""]), row(&["b", "2", "x"])];
        assert_eq!(write_report(&path, &HEADER, rows).unwrap(), 2);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Name,When,Note\r\na,1,\r\nb,2,x\r\n"
        );
    }

    #[test]
    fn special_characters_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");

        let rows = vec![row(&["Smith, John", "say \"hi\"", "two\nlines"])];
        write_report(&path, &HEADER, rows.clone()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"Smith, John\""));
        assert!(content.contains("\"say \"\"hi\"\"\""));
        assert!(content.contains("\"two\nlines\""));
        assert_eq!(read_back(&path)[1], rows[0]);
    }

    #[test]
    fn non_ascii_is_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");

        write_report(&path, &HEADER, vec![row(&["— Work", "", "Café"])]).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("— Work,,Café\r\n"));
    }

    #[test]
    fn replaces_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        std::fs::write(&path, "old content that is much longer than the new report\n").unwrap();

        write_report(&path, &HEADER, Vec::new()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Name,When,Note\r\n");
    }

    #[test]
    fn arity_mismatch_leaves_destination_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        std::fs::write(&path, "previous\n").unwrap();

        let rows = vec![row(&["a", "1", ""]), row(&["short"])];
        let err = write_report(&path, &HEADER, rows).unwrap_err();
        assert!(matches!(
            err,
            ExportError::RowArity {
                row: 2,
                expected: 3,
                found: 1
            }
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous\n");

        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1, "temporary file is cleaned up");
    }

    #[test]
    fn missing_directory_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/report.csv");

        let err = write_report(&path, &HEADER, Vec::new()).unwrap_err();
        assert!(matches!(err, ExportError::Write { .. }));
    }

    #[test]
    fn io_failure_while_writing_names_the_report() {
        let err = csv_failure(
            Path::new("/reports/out.csv"),
            csv::Error::from(std::io::Error::other("disk full")),
        );
        assert!(matches!(err, ExportError::Write { .. }));
        assert!(err.to_string().contains("/reports/out.csv"));
    }

    #[test]
    fn serialization_failure_stays_a_csv_error() {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["a"]).unwrap();
        let err = writer.write_record(["a", "b"]).unwrap_err();

        let err = csv_failure(Path::new("out.csv"), err);
        assert!(matches!(err, ExportError::Csv(_)));
    }

    #[cfg(unix)]
    mod permissions {
        use super::*;
        use std::os::unix::fs::{PermissionsExt, symlink};

        fn mode(path: &Path) -> u32 {
            fs::metadata(path).unwrap().permissions().mode() & 0o777
        }

        #[test]
        fn new_report_follows_umask() {
            let dir = tempfile::tempdir().unwrap();
            let reference = dir.path().join("reference");
            fs::File::create(&reference).unwrap();
            let path = dir.path().join("report.csv");

            write_report(&path, &HEADER, Vec::new()).unwrap();
            assert_eq!(mode(&path), mode(&reference));
        }

        #[test]
        fn replaced_report_keeps_its_mode() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("report.csv");
            fs::write(&path, "old\n").unwrap();
            fs::set_permissions(&path, Permissions::from_mode(0o640)).unwrap();

            write_report(&path, &HEADER, Vec::new()).unwrap();
            assert_eq!(mode(&path), 0o640);
            assert_eq!(fs::read_to_string(&path).unwrap(), "Name,When,Note\r\n");
        }

        #[test]
        fn symlinked_report_is_written_through() {
            let dir = tempfile::tempdir().unwrap();
            let real = dir.path().join("real.csv");
            fs::write(&real, "old\n").unwrap();
            let link = dir.path().join("report.csv");
            symlink(&real, &link).unwrap();

            write_report(&link, &HEADER, Vec::new()).unwrap();
            assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
            assert_eq!(fs::read_to_string(&real).unwrap(), "Name,When,Note\r\n");
        }
    }
}
