use crate::gateway::environ::Environ;

/// Status line plus ordered header pairs, committed once per request via
/// [`ResponseContext::start`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseHead {
    /// Status line without the protocol token, e.g. "200 OK".
    pub status: String,
    /// Header pairs, written to the wire in this order.
    pub headers: Vec<(String, String)>,
}

impl ResponseHead {
    pub fn new(status: impl Into<String>, headers: Vec<(String, String)>) -> Self {
        Self {
            status: status.into(),
            headers,
        }
    }

    /// Shorthand for a head carrying only a `Content-type: text/html` pair.
    pub fn html(status: impl Into<String>) -> Self {
        Self::new(
            status,
            vec![("Content-type".to_string(), "text/html".to_string())],
        )
    }
}

/// Per-request commit point for the response head.
///
/// The application may call [`start`](Self::start) more than once to
/// restart a response it has not begun producing; the last call before
/// any body byte is written wins. The gateway does not arbitrate calls
/// made after body production has begun.
#[derive(Debug, Default)]
pub struct ResponseContext {
    head: Option<ResponseHead>,
}

impl ResponseContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits the response head, replacing any earlier commit.
    pub fn start(&mut self, status: impl Into<String>, headers: Vec<(String, String)>) {
        self.head = Some(ResponseHead::new(status, headers));
    }

    pub fn committed(&self) -> bool {
        self.head.is_some()
    }

    pub fn into_head(self) -> Option<ResponseHead> {
        self.head
    }
}

/// Finite, lazily-produced response body.
///
/// Produced once by the application, consumed once by the response
/// writer. An `Err` chunk models a body that fails mid-stream. Dropping
/// the body releases whatever resource the application attached to the
/// underlying iterator.
pub struct Body {
    chunks: Box<dyn Iterator<Item = anyhow::Result<Vec<u8>>> + Send>,
}

impl Body {
    pub fn new<I>(chunks: I) -> Self
    where
        I: Iterator<Item = anyhow::Result<Vec<u8>>> + Send + 'static,
    {
        Self {
            chunks: Box::new(chunks),
        }
    }

    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }

    pub fn from_chunks(chunks: Vec<Vec<u8>>) -> Self {
        Self::new(chunks.into_iter().map(Ok))
    }
}

impl Iterator for Body {
    type Item = anyhow::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next()
    }
}

impl std::fmt::Debug for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Body")
    }
}

/// The application mounted behind the gateway.
///
/// Called exactly once per request with the request's [`Environ`] and a
/// fresh [`ResponseContext`]. The gateway never inspects what happens
/// inside; it only forwards the committed head and the returned body.
/// Returning `Err`, or returning without committing a head, is an
/// application failure the connection driver answers with a 500.
pub trait Application: Send + Sync + 'static {
    fn call(&self, env: &mut Environ, res: &mut ResponseContext) -> anyhow::Result<Body>;
}

impl<F> Application for F
where
    F: Fn(&mut Environ, &mut ResponseContext) -> anyhow::Result<Body> + Send + Sync + 'static,
{
    fn call(&self, env: &mut Environ, res: &mut ResponseContext) -> anyhow::Result<Body> {
        self(env, res)
    }
}

/// Reference application: answers every request with a plaintext dump of
/// the environment it was handed. Mounted by the binary and reused by
/// the end-to-end tests.
pub fn environ_dump(env: &mut Environ, res: &mut ResponseContext) -> anyhow::Result<Body> {
    res.start(
        "200 OK",
        vec![("Content-type".to_string(), "text/plain".to_string())],
    );

    let mut out = String::from("This is your environ. Hello, world!\n\n");
    for (key, value) in env.entries() {
        out.push_str(key);
        out.push_str(": ");
        out.push_str(&value);
        out.push('\n');
    }

    Ok(Body::from_chunks(vec![out.into_bytes()]))
}
