use std::thread;
use std::time::{Duration, Instant};

use crate::{
    event::*,
    event_log::{self, LogEvent, WithOffset},
};
use anyhow::Result;

#[test]
fn event_logs_sanity_check() -> Result<()> {
    let (event_writer, event_reader) = event_log::new_in_memory_shared();

    let start_offset = event_reader.get_start_offset()?;

    assert_eq!(
        event_reader.read(start_offset, 0, Some(Duration::from_secs(0)))?,
        WithOffset {
            offset: start_offset,
            data: vec![]
        }
    );

    assert_eq!(
        event_reader.read(start_offset, 1, Some(Duration::from_secs(0)))?,
        WithOffset {
            offset: start_offset,
            data: vec![]
        }
    );

    let inserted_offset = event_writer.write(&[Event::Test])?;

    assert_eq!(
        event_reader.read(inserted_offset, 1, Some(Duration::from_secs(0)))?,
        WithOffset {
            offset: inserted_offset,
            data: vec![]
        }
    );

    assert_eq!(
        event_reader.read(start_offset, 1, Some(Duration::from_secs(0)))?,
        WithOffset {
            offset: inserted_offset,
            data: vec![LogEvent {
                offset: start_offset,
                details: Event::Test
            }]
        }
    );

    Ok(())
}

#[test]
fn reads_respect_limit() -> Result<()> {
    let (event_writer, event_reader) = event_log::new_in_memory_shared();
    assert_eq!(event_writer.write(&[Event::Test, Event::Test, Event::Test])?, 3);

    let first = event_reader.read(0, 2, None)?;
    assert_eq!(first.offset, 2);
    assert_eq!(
        first.data.iter().map(|e| e.offset).collect::<Vec<_>>(),
        vec![0, 1]
    );

    let rest = event_reader.read(first.offset, 10, None)?;
    assert_eq!(rest.offset, 3);
    assert_eq!(rest.data.len(), 1);
    Ok(())
}

#[test]
fn reading_past_the_end_fails() -> Result<()> {
    let (_event_writer, event_reader) = event_log::new_in_memory_shared();
    assert!(event_reader.read(5, 1, Some(Duration::from_secs(0))).is_err());
    Ok(())
}

#[test]
fn blocked_reader_wakes_up_on_write() -> Result<()> {
    let (event_writer, event_reader) = event_log::new_in_memory_shared();

    let started = Instant::now();
    let read = thread::scope(|s| -> Result<WithOffset<Vec<LogEvent>>> {
        let reader = s.spawn(|| event_reader.read(0, 1, Some(Duration::from_secs(10))));
        thread::sleep(Duration::from_millis(50));
        event_writer.write(&[Event::Test])?;
        reader.join().expect("reader panicked")
    })?;

    assert_eq!(read.data.len(), 1);
    assert!(started.elapsed() < Duration::from_secs(10));
    Ok(())
}
