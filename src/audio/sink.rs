//! Utilities for creating `rodio` sinks from media files.
//!
//! The helpers here encapsulate opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;
use rodio::{Decoder, OutputStream, Sink, Source};

use super::error::LoadError;

pub(super) struct PreparedSink {
    pub sink: Sink,
    pub total_duration: Option<Duration>,
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
///
/// `streaming` decodes from the open file; otherwise the file is read into
/// memory first.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    streaming: bool,
    start_at: Duration,
) -> Result<PreparedSink, LoadError> {
    let open_err = |source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(open_err)?;
    if streaming {
        connect(stream, BufReader::new(file), path, start_at)
    } else {
        let mut bytes = Vec::new();
        BufReader::new(file)
            .read_to_end(&mut bytes)
            .map_err(open_err)?;
        connect(stream, Cursor::new(bytes), path, start_at)
    }
}

fn connect<R>(
    stream: &OutputStream,
    reader: R,
    path: &Path,
    start_at: Duration,
) -> Result<PreparedSink, LoadError>
where
    R: Read + Seek + Send + Sync + 'static,
{
    let decoder = Decoder::new(reader).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let total_duration = decoder.total_duration();

    let sink = Sink::connect_new(stream.mixer());
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    sink.append(decoder.skip_duration(start_at));
    sink.pause();

    Ok(PreparedSink {
        sink,
        total_duration,
    })
}

/// Container-reported length, for decoders that cannot tell.
pub(super) fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
}
