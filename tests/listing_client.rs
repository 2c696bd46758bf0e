use dirplay::catalog::{ListingClient, ListingClientConfig};
use dirplay::error::FetchError;

fn client(server: &mockito::Server) -> ListingClient {
    ListingClient::new(&ListingClientConfig {
        base_url: server.url(),
        timeout_secs: 5,
        connect_timeout_secs: 5,
    })
    .expect("client")
}

#[tokio::test]
async fn fetches_tracks_in_listing_order() {
    let mut server = mockito::Server::new_async().await;
    let body = r#"<html><body><ul>
        <li><a href="../">..</a></li>
        <li><a href="/songs/Pop/B%20-%20Song2.mp3">B - Song2.mp3</a></li>
        <li><a href="A%20-%20Song1.mp3">A - Song1.mp3</a></li>
        <li><a href="cover.jpg">cover.jpg</a></li>
    </ul></body></html>"#;
    let mock = server
        .mock("GET", "/songs/Pop/")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(body)
        .create_async()
        .await;

    let tracks = client(&server)
        .fetch_listing("songs/Pop")
        .await
        .expect("listing");

    mock.assert_async().await;
    let ids: Vec<&str> = tracks.iter().map(|t| t.id()).collect();
    assert_eq!(ids, vec!["B%20-%20Song2.mp3", "A%20-%20Song1.mp3"]);
    assert_eq!(tracks[1].now_playing_label().title, "A ");
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/songs/Missing/")
        .with_status(404)
        .create_async()
        .await;

    let err = client(&server)
        .fetch_listing("songs/Missing")
        .await
        .unwrap_err();

    match err {
        FetchError::Status { status, url } => {
            assert_eq!(status.as_u16(), 404);
            assert!(url.ends_with("/songs/Missing/"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn listing_without_audio_is_empty() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/songs/Empty/")
        .with_status(200)
        .with_body(r#"<a href="readme.txt">readme</a><a href="sub/">sub</a>"#)
        .create_async()
        .await;

    let tracks = client(&server)
        .fetch_listing("songs/Empty")
        .await
        .expect("listing");
    assert!(tracks.is_empty());
}
