use portico::gateway::app::{Body, ResponseHead};
use portico::http::writer::{serialize_head, write_response};
use tokio::io::AsyncReadExt;

async fn written_bytes(head: &ResponseHead, body: Body) -> Vec<u8> {
    let (mut client, mut server) = tokio::io::duplex(65536);

    write_response(&mut server, head, body).await.unwrap();
    drop(server);

    let mut out = Vec::new();
    client.read_to_end(&mut out).await.unwrap();
    out
}

#[test]
fn test_serialize_head_exact_bytes() {
    let head = ResponseHead::new(
        "200 OK",
        vec![("Content-type".to_string(), "text/html".to_string())],
    );

    assert_eq!(
        serialize_head(&head),
        b"HTTP/1.0 200 OK\r\nContent-type: text/html\r\n\r\n"
    );
}

#[test]
fn test_serialize_head_preserves_header_order() {
    let head = ResponseHead::new(
        "200 OK",
        vec![
            ("B-Second".to_string(), "2".to_string()),
            ("A-First".to_string(), "1".to_string()),
        ],
    );

    assert_eq!(
        serialize_head(&head),
        b"HTTP/1.0 200 OK\r\nB-Second: 2\r\nA-First: 1\r\n\r\n"
    );
}

#[test]
fn test_serialize_head_no_headers() {
    let head = ResponseHead::new("404 Not Found", vec![]);

    assert_eq!(serialize_head(&head), b"HTTP/1.0 404 Not Found\r\n\r\n");
}

#[tokio::test]
async fn test_write_response_round_trip_exact_bytes() {
    let head = ResponseHead::new(
        "200 OK",
        vec![("Content-type".to_string(), "text/html".to_string())],
    );
    let body = Body::from_chunks(vec![b"<h1>hi</h1>".to_vec()]);

    let out = written_bytes(&head, body).await;

    assert_eq!(
        out,
        b"HTTP/1.0 200 OK\r\nContent-type: text/html\r\n\r\n<h1>hi</h1>"
    );
}

#[tokio::test]
async fn test_write_response_streams_chunks_in_order() {
    let head = ResponseHead::new("200 OK", vec![]);
    let body = Body::from_chunks(vec![
        b"one ".to_vec(),
        b"two ".to_vec(),
        b"three".to_vec(),
    ]);

    let out = written_bytes(&head, body).await;

    assert_eq!(out, b"HTTP/1.0 200 OK\r\n\r\none two three");
}

#[tokio::test]
async fn test_write_response_empty_body() {
    let head = ResponseHead::new("204 No Content", vec![]);

    let out = written_bytes(&head, Body::empty()).await;

    assert_eq!(out, b"HTTP/1.0 204 No Content\r\n\r\n");
}

#[tokio::test]
async fn test_write_response_does_not_inject_content_length() {
    let head = ResponseHead::new("200 OK", vec![]);
    let body = Body::from_chunks(vec![b"payload".to_vec()]);

    let out = written_bytes(&head, body).await;

    assert!(!String::from_utf8_lossy(&out).to_lowercase().contains("content-length"));
}

#[tokio::test]
async fn test_write_response_failing_chunk_aborts_after_head() {
    let head = ResponseHead::new("200 OK", vec![]);
    let body = Body::new(
        vec![
            Ok(b"partial".to_vec()),
            Err(anyhow::anyhow!("body source failed")),
        ]
        .into_iter(),
    );

    let (mut client, mut server) = tokio::io::duplex(65536);
    let result = write_response(&mut server, &head, body).await;
    drop(server);

    assert!(result.is_err());

    let mut out = Vec::new();
    client.read_to_end(&mut out).await.unwrap();
    assert_eq!(out, b"HTTP/1.0 200 OK\r\n\r\npartial");
}
