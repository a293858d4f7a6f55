use h2_semantics::{
    on_data_chunk, on_header, on_remote_end_stream, on_request_headers_complete, on_response_headers_complete,
    on_trailer_headers_complete, record_request_method, FrameKind, HeaderOutcome, Peer, StreamHttpState,
};

fn accept(state: &mut StreamHttpState, peer: Peer, kind: FrameKind, name: &[u8], value: &[u8]) {
    assert_eq!(
        on_header(state, peer, kind, name, value, false),
        Ok(HeaderOutcome::Accepted)
    );
}

#[test]
fn get_request_with_trailers_and_matching_content_length() {
    let _ = env_logger::try_init();

    let mut state = StreamHttpState::new(1);
    accept(&mut state, Peer::Server, FrameKind::Headers, b":method", b"GET");
    accept(&mut state, Peer::Server, FrameKind::Headers, b":scheme", b"https");
    accept(&mut state, Peer::Server, FrameKind::Headers, b":path", b"/report");
    accept(&mut state, Peer::Server, FrameKind::Headers, b":authority", b"x.test");
    accept(&mut state, Peer::Server, FrameKind::Headers, b"content-length", b"11");
    assert!(on_request_headers_complete(&mut state, FrameKind::Headers).is_ok());

    assert!(on_data_chunk(&mut state, 11).is_ok());

    let outcome = on_header(
        &mut state,
        Peer::Server,
        FrameKind::Headers,
        b"x-checksum",
        b"deadbeef",
        true,
    );
    assert_eq!(outcome, Ok(HeaderOutcome::Accepted));
    assert!(on_trailer_headers_complete(true).is_ok());
    assert!(on_remote_end_stream(&state).is_ok());
}

#[test]
fn trailer_carrying_a_pseudo_header_is_rejected() {
    let _ = env_logger::try_init();

    let mut state = StreamHttpState::new(1);
    accept(&mut state, Peer::Server, FrameKind::Headers, b":method", b"GET");
    accept(&mut state, Peer::Server, FrameKind::Headers, b":scheme", b"http");
    accept(&mut state, Peer::Server, FrameKind::Headers, b":path", b"/");
    accept(&mut state, Peer::Server, FrameKind::Headers, b"host", b"x.test");
    assert!(on_request_headers_complete(&mut state, FrameKind::Headers).is_ok());

    let outcome = on_header(&mut state, Peer::Server, FrameKind::Headers, b":path", b"/", true);
    assert!(outcome.is_err());
}

#[test]
fn connect_request_needs_only_authority() {
    let _ = env_logger::try_init();

    let mut state = StreamHttpState::new(1);
    accept(&mut state, Peer::Server, FrameKind::Headers, b":method", b"CONNECT");
    accept(&mut state, Peer::Server, FrameKind::Headers, b":authority", b"x.test:443");
    assert!(on_request_headers_complete(&mut state, FrameKind::Headers).is_ok());
    assert_eq!(state.content_length(), -1);

    // a CONNECT response carries an unbounded body, same as the request.
    let mut response = StreamHttpState::new(1);
    response.set_flag(h2_semantics::proto::streams::state::Flags::METH_CONNECT);
    accept(&mut response, Peer::Client, FrameKind::Headers, b":status", b"200");
    assert!(on_response_headers_complete(&mut response).is_ok());
    assert_eq!(response.content_length(), -1);
}

#[test]
fn push_promise_request_block_validates_even_from_a_client() {
    let _ = env_logger::try_init();

    let mut state = StreamHttpState::new(2);
    accept(&mut state, Peer::Client, FrameKind::PushPromise, b":method", b"GET");
    accept(&mut state, Peer::Client, FrameKind::PushPromise, b":scheme", b"https");
    accept(&mut state, Peer::Client, FrameKind::PushPromise, b":path", b"/style.css");
    accept(&mut state, Peer::Client, FrameKind::PushPromise, b":authority", b"x.test");
    assert!(on_request_headers_complete(&mut state, FrameKind::PushPromise).is_ok());

    // the same `StreamHttpState` now validates the promised response.
    accept(&mut state, Peer::Client, FrameKind::Headers, b":status", b"200");
    assert!(on_response_headers_complete(&mut state).is_ok());
}

#[test]
fn connect_may_not_be_used_on_a_pushed_stream() {
    let _ = env_logger::try_init();

    let mut state = StreamHttpState::new(2);
    accept(&mut state, Peer::Server, FrameKind::PushPromise, b":authority", b"x.test:443");
    let outcome = on_header(
        &mut state,
        Peer::Server,
        FrameKind::PushPromise,
        b":method",
        b"CONNECT",
        false,
    );
    assert!(outcome.is_err());
}

#[test]
fn record_request_method_primes_head_before_full_validation() {
    let _ = env_logger::try_init();

    let mut state = StreamHttpState::new(1);
    let headers: Vec<(&[u8], &[u8])> = vec![
        (b":method", b"HEAD"),
        (b":scheme", b"https"),
        (b":path", b"/"),
        (b":authority", b"x.test"),
    ];
    record_request_method(&mut state, FrameKind::Headers, headers.clone());

    for (name, value) in headers {
        accept(&mut state, Peer::Server, FrameKind::Headers, name, value);
    }
    assert!(on_request_headers_complete(&mut state, FrameKind::Headers).is_ok());

    let mut response = state.clone();
    accept(&mut response, Peer::Client, FrameKind::Headers, b":status", b"200");
    accept(&mut response, Peer::Client, FrameKind::Headers, b"content-length", b"1024");
    assert!(on_response_headers_complete(&mut response).is_ok());
    assert_eq!(response.content_length(), 0);
}

#[test]
fn te_header_rejects_anything_but_trailers() {
    let _ = env_logger::try_init();

    let mut state = StreamHttpState::new(1);
    accept(&mut state, Peer::Server, FrameKind::Headers, b":method", b"GET");
    let outcome = on_header(&mut state, Peer::Server, FrameKind::Headers, b"te", b"gzip", false);
    assert!(outcome.is_err());

    let mut state = StreamHttpState::new(3);
    accept(&mut state, Peer::Server, FrameKind::Headers, b":method", b"GET");
    let outcome = on_header(&mut state, Peer::Server, FrameKind::Headers, b"te", b"Trailers", false);
    assert_eq!(outcome, Ok(HeaderOutcome::Accepted));
}
