use std::fs::OpenOptions;
use std::io::Write;
use std::time::Duration;
use tail_follow::{FollowConfig, tail_file};
use tokio_stream::StreamExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("app.log");
    std::fs::write(
        &path,
        "2023-01-01 10:00:00 INFO Starting application\n\
         2023-01-01 10:00:01 INFO Loading configuration\n\
         2023-01-01 10:00:02 INFO Database connection established\n",
    )?;

    let config = FollowConfig::default()
        .with_initial_lines(2)
        .with_poll_interval(Duration::from_millis(100));
    let mut stream = tail_file(&path, Some(config)).await?;

    // Keep writing while the stream is being consumed
    let writer_path = path.clone();
    tokio::spawn(async move {
        for i in 0..3 {
            tokio::time::sleep(Duration::from_millis(250)).await;
            if let Ok(mut file) = OpenOptions::new().append(true).open(&writer_path) {
                let _ = writeln!(file, "2023-01-01 10:00:1{} INFO Request {} served", i, i);
            }
        }
    });

    println!("Following {} ...", path.display());

    let mut count = 0;
    while let Some(line) = stream.next().await {
        print!("  [{}]: {}", count + 1, line?);
        count += 1;
        if count >= 5 {
            break;
        }
    }

    Ok(())
}
