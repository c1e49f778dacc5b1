use instant::SystemTime;
use ringbuffer::{ConstGenericRingBuffer, RingBufferExt, RingBufferWrite};

/// Number of formatted lines the logger keeps after flushing.
pub const HISTORY_LEN: usize = 64;

#[macro_export]
macro_rules! log_to {
    ($target:expr, $($arg:tt)*) => {
        $target.log(format!($($arg)*))
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogType {
    General,
    Discovery,
    Lifecycle,
}

#[derive(Clone)]
pub struct LogEndpoint {
    pub ty: LogType,
    tx: flume::Sender<String>,
}

impl LogEndpoint {
    pub fn log(&self, s: String) {
        // The receiver only goes away together with the controller.
        let _ = self.tx.send(s);
    }
}

pub type FmtF = Box<dyn Fn(String, &LogEndpoint) -> String>;

pub struct LogEndpointBuilder<'a> {
    ty: LogType,
    logger: &'a mut Logger,

    fmt: Option<FmtF>,
    print: bool,
}

impl<'a> LogEndpointBuilder<'a> {
    pub fn fmt(mut self, f: impl Fn(String, &LogEndpoint) -> String + 'static) -> Self {
        self.fmt = Some(Box::new(f) as Box<_>);
        self
    }

    pub fn print(mut self, print: bool) -> Self {
        self.print = print;
        self
    }

    pub fn build(self) -> LogEndpoint {
        let (tx, rx) = flume::unbounded();
        let endpoint = LogEndpoint { ty: self.ty, tx };
        self.logger.types.push(LogEndpointEntry {
            rx,
            fmt: self.fmt.unwrap_or_else(|| Box::new(default_fmt)),
            endpoint: endpoint.clone(),
            print: self.print,
        });
        endpoint
    }
}

fn default_fmt(s: String, endpoint: &LogEndpoint) -> String {
    let secs = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    format!("/{}/ [{:?}] {}", secs, endpoint.ty, s)
}

struct LogEndpointEntry {
    rx: flume::Receiver<String>,
    fmt: FmtF,
    endpoint: LogEndpoint,
    print: bool,
}

pub struct Logger {
    types: Vec<LogEndpointEntry>,
    history: ConstGenericRingBuffer<String, HISTORY_LEN>,
}

impl Logger {
    pub fn new() -> Self {
        Logger {
            types: Vec::new(),
            history: ConstGenericRingBuffer::new(),
        }
    }

    pub fn init_endpoint(&mut self, ty: LogType) -> LogEndpointBuilder {
        LogEndpointBuilder {
            ty,
            logger: self,
            fmt: None,
            print: true,
        }
    }

    /// Formats everything queued since the last flush, prints it and records it in the history.
    pub fn flush(&mut self) {
        for entry in &mut self.types {
            for info in entry.rx.drain() {
                let line = (entry.fmt)(info, &entry.endpoint);
                if entry.print {
                    emit(&line);
                }
                self.history.push(line);
            }
        }
    }

    /// Most recent flushed lines, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history.to_vec()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Logger::new()
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(line: &str) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(line));
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(line: &str) {
    println!("{}", line);
}

#[test]
fn test_endpoints() {
    let mut logger = Logger::new();
    let general = logger.init_endpoint(LogType::General).print(false).build();
    let discovery = logger
        .init_endpoint(LogType::Discovery)
        .fmt(|s, endpoint| format!("{:?}: {}", endpoint.ty, s))
        .print(false)
        .build();

    log_to!(general, "hello {}", 1);
    log_to!(discovery, "found");
    assert!(logger.history().is_empty());

    logger.flush();
    let history = logger.history();
    assert_eq!(history.len(), 2);
    assert!(history[0].ends_with("[General] hello 1"));
    assert_eq!(history[1], "Discovery: found");

    logger.flush();
    assert_eq!(logger.history().len(), 2);
}

#[test]
fn test_history_is_bounded() {
    let mut logger = Logger::new();
    let general = logger
        .init_endpoint(LogType::General)
        .fmt(|s, _| s)
        .print(false)
        .build();
    for i in 0..HISTORY_LEN + 3 {
        log_to!(general, "{}", i);
    }
    logger.flush();
    let history = logger.history();
    assert_eq!(history.len(), HISTORY_LEN);
    assert_eq!(history[0], "3");
}
