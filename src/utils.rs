pub fn is_youtube_video_link(url: &str) -> bool {
    let url = url.trim().to_lowercase();

    let is_youtube_domain = url.starts_with("https://www.youtube.com/watch?")
        || url.starts_with("http://www.youtube.com/watch?")
        || url.starts_with("https://youtube.com/watch?")
        || url.starts_with("http://youtube.com/watch?")
        || url.starts_with("https://m.youtube.com/watch?")
        || url.starts_with("https://www.youtube.com/shorts/")
        || url.starts_with("https://youtu.be/")
        || url.starts_with("http://youtu.be/");

    if !is_youtube_domain {
        return false;
    }

    if let Some((_, query)) = url.split_once("/watch?") {
        return query
            .split('&')
            .any(|pair| pair.strip_prefix("v=").is_some_and(|id| !id.is_empty()));
    }

    // youtu.be/<id> and shorts/<id> need something after the slash
    url.rsplit_once('/')
        .is_some_and(|(_, id)| !id.is_empty())
}

pub fn format_duration(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}
