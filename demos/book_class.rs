use gymweg::client::GymClient;
use gymweg::types::{Credentials, Lesson};

#[tokio::main(flavor = "current_thread")]
#[cfg_attr(feature = "multi", allow(unused_mut))]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("GYMWEG_LOG").unwrap_or_else(|_| "gymweg=info".into()),
        )
        .init();

    let (Ok(email), Ok(password)) = (std::env::var("GYM_EMAIL"), std::env::var("GYM_PASSWORD"))
    else {
        eprintln!("GYM_EMAIL and GYM_PASSWORD must be set.");
        return;
    };

    let mut gym = GymClient::builder().try_build().unwrap();
    let credentials = Credentials::new(email, password);

    // Look around first, the same way the site would be browsed.
    gym.prime_session().await.unwrap();
    gym.login(Some(&credentials), false).await.unwrap();
    match gym.list_clubs().await {
        Ok(clubs) => println!("Clubs: {clubs}"),
        Err(e) => println!("Couldn't get clubs: {e}"),
    }
    _ = gym.logout().await;

    // Then book from start to finish.
    let lesson = Lesson::new("8291734", "Muay Thai", "18:30");
    match gym.book_class(&credentials, &lesson).await {
        Ok(res) => println!("Booked {lesson}: {res}"),
        Err(e) => println!("Got an error when trying to book {lesson}: {e}"),
    }
}
