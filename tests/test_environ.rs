use bytes::Bytes;
use portico::config::ServerIdentity;
use portico::gateway::environ::{BodyReader, Environ};
use portico::http::parser::parse_request;

fn identity() -> ServerIdentity {
    ServerIdentity::from_addr("testserver:8080")
}

#[test]
fn test_environ_for_get_without_body() {
    let request = parse_request(b"GET /x?a=1 HTTP/1.0\r\nHost: testserver\r\n\r\n").unwrap();
    let mut env = Environ::build(&request, &identity());

    assert_eq!(env.request_method, "GET");
    assert_eq!(env.path, "/x");
    assert_eq!(env.query_string, "a=1");
    assert_eq!(env.content_length, 0);
    assert_eq!(env.content_type, "");
    assert!(env.body.read_all().is_empty());
}

#[test]
fn test_environ_server_identity_and_scheme() {
    let request = parse_request(b"GET / HTTP/1.0\r\n\r\n").unwrap();
    let env = Environ::build(&request, &identity());

    assert_eq!(env.server_name, "testserver");
    assert_eq!(env.server_port, 8080);
    assert_eq!(env.url_scheme, "http");
}

#[test]
fn test_environ_post_body_yields_declared_bytes_once() {
    let mut request = parse_request(
        b"POST /submit HTTP/1.0\r\nContent-Length: 27\r\nContent-Type: application/x-www-form-urlencoded\r\n\r\n",
    )
    .unwrap();
    request.body = Bytes::from_static(b"firstname=Bill&lastname=Nye");

    let mut env = Environ::build(&request, &identity());

    assert_eq!(env.content_length, 27);
    assert_eq!(env.content_type, "application/x-www-form-urlencoded");
    assert_eq!(&env.body.read_all()[..], b"firstname=Bill&lastname=Nye");

    // Single-pass: a second read yields nothing.
    assert!(env.body.read_all().is_empty());
}

#[test]
fn test_environ_cookie_copied_verbatim() {
    let request =
        parse_request(b"GET / HTTP/1.0\r\nCookie: session=abc123; theme=dark\r\n\r\n").unwrap();
    let env = Environ::build(&request, &identity());

    assert_eq!(env.cookie, "session=abc123; theme=dark");
}

#[test]
fn test_environ_cookie_absent_is_empty() {
    let request = parse_request(b"GET / HTTP/1.0\r\n\r\n").unwrap();
    let env = Environ::build(&request, &identity());

    assert_eq!(env.cookie, "");
}

#[test]
fn test_environ_zero_content_length_same_as_absent() {
    let with_header =
        parse_request(b"POST / HTTP/1.0\r\nContent-Length: 0\r\n\r\n").unwrap();
    let without_header = parse_request(b"POST / HTTP/1.0\r\n\r\n").unwrap();

    let mut a = Environ::build(&with_header, &identity());
    let mut b = Environ::build(&without_header, &identity());

    assert_eq!(a.content_length, b.content_length);
    assert_eq!(a.body.read_all(), b.body.read_all());
}

#[test]
fn test_environ_entries_order_and_keys() {
    let request = parse_request(b"GET /x?a=1 HTTP/1.0\r\n\r\n").unwrap();
    let env = Environ::build(&request, &identity());

    let keys: Vec<&str> = env.entries().iter().map(|(k, _)| *k).collect();
    assert_eq!(
        keys,
        vec![
            "request_method",
            "path",
            "query_string",
            "content_type",
            "content_length",
            "server_name",
            "server_port",
            "url_scheme",
            "cookie",
        ]
    );
}

#[test]
fn test_body_reader_partial_reads() {
    let mut reader = BodyReader::new(Bytes::from_static(b"hello world"));

    assert_eq!(&reader.read(5)[..], b"hello");
    assert_eq!(reader.remaining(), 6);
    assert_eq!(&reader.read_all()[..], b" world");
    assert_eq!(reader.remaining(), 0);
    assert!(reader.read(5).is_empty());
}
