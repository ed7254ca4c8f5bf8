use std::ffi::OsStr;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::process::{Command, Output};
use std::thread::{self, JoinHandle};

/// Origin that answers a fixed number of connections, then stops.
pub struct Origin {
    pub url: String,
    handle: JoinHandle<Vec<String>>,
}

impl Origin {
    /// Waits for every expected connection and returns the request heads in
    /// arrival order. Only call this once the client has sent them all.
    ///
    /// # Errors
    ///
    /// Returns an error if the server thread panicked.
    pub fn requests(self) -> Result<Vec<String>, String> {
        self.handle
            .join()
            .map_err(|err| format!("origin thread panicked: {:?}", err))
    }
}

/// Serves `connections` requests. `/missing` answers 404, everything else a
/// small JSON document. Returns `None` where the sandbox forbids sockets.
///
/// # Errors
///
/// Returns an error when the listener cannot be bound for another reason.
pub fn origin(connections: usize) -> Result<Option<Origin>, String> {
    let listener = match TcpListener::bind("127.0.0.1:0") {
        Ok(listener) => listener,
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
            eprintln!("Skipping e2e test: {}", err);
            return Ok(None);
        }
        Err(err) => return Err(format!("bind origin failed: {}", err)),
    };
    let addr = listener
        .local_addr()
        .map_err(|err| format!("origin addr failed: {}", err))?;

    let handle = thread::spawn(move || {
        let mut heads = Vec::with_capacity(connections);
        for mut stream in listener.incoming().take(connections).flatten() {
            let head = read_head(&mut stream);
            let reply: &[u8] = if head.contains(" /missing ") {
                b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
            } else {
                b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 8\r\nConnection: close\r\n\r\n{\"n\":1}\n"
            };
            drop(stream.write_all(reply));
            heads.push(head);
        }
        heads
    });

    Ok(Some(Origin {
        url: format!("http://{}", addr),
        handle,
    }))
}

/// Reads up to the blank line ending the head, then drains any body.
fn read_head<R: Read>(stream: R) -> String {
    let mut reader = BufReader::new(stream);
    let mut head = String::new();
    let mut length = 0usize;
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        if line == "\r\n" {
            break;
        }
        if let Some((name, value)) = line.split_once(':')
            && name.eq_ignore_ascii_case("content-length")
        {
            length = value.trim().parse().unwrap_or(0);
        }
        head.push_str(&line);
    }
    let mut body = vec![0u8; length];
    drop(reader.read_exact(&mut body));
    head
}

/// Runs the `httpreq` binary with a clean environment.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_httpreq<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(env!("CARGO_BIN_EXE_httpreq"));
    command.args(args).env("RUST_LOG", "error");
    for name in [
        "HTTPREQ_LOG",
        "HTTPREQ_TIMEOUT",
        "HTTPREQ_CERT",
        "HTTPREQ_KEY",
        "AWS_ACCESS_KEY_ID",
        "AWS_SECRET_ACCESS_KEY",
        "AWS_SESSION_TOKEN",
    ] {
        command.env_remove(name);
    }
    command
        .output()
        .map_err(|err| format!("run httpreq failed: {}", err))
}
