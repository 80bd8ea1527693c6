use std::collections::{HashMap, HashSet};

use super::dataset::Dataset;
use super::error::SeedError;
use crate::collections::Collection;

fn unique_keys<'a>(
    collection: Collection,
    keys: impl IntoIterator<Item = &'a str>,
) -> Result<HashSet<&'a str>, SeedError> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(SeedError::DuplicateKey {
                collection,
                key: key.to_string(),
            });
        }
    }
    Ok(seen)
}

fn require(
    known: &HashSet<&str>,
    collection: Collection,
    key: &str,
    target: Collection,
    reference: &str,
) -> Result<(), SeedError> {
    if known.contains(reference) {
        Ok(())
    } else {
        Err(SeedError::DanglingReference {
            collection,
            key: key.to_string(),
            target,
            missing: reference.to_string(),
        })
    }
}

/// Checks key uniqueness and that every reference resolves, including that a track's
/// denormalized artist matches the artist of its album. Stops at the first problem.
pub fn validate(dataset: &Dataset) -> Result<(), SeedError> {
    unique_keys(Collection::Genres, dataset.genres.iter().map(String::as_str))?;
    let artists = unique_keys(
        Collection::Artists,
        dataset.artists.iter().map(|a| a.key.as_str()),
    )?;
    let users = unique_keys(Collection::Users, dataset.users.iter().map(|u| u.key.as_str()))?;
    unique_keys(
        Collection::Playlists,
        dataset.playlists.iter().map(|p| p.key.as_str()),
    )?;
    unique_keys(
        Collection::Tracks,
        dataset.tracks.iter().map(|t| t.key.as_str()),
    )?;
    let albums = unique_keys(
        Collection::Albums,
        dataset.albums.iter().map(|a| a.key.as_str()),
    )?;

    let mut album_artist: HashMap<&str, &str> = HashMap::new();
    for album in &dataset.albums {
        require(
            &artists,
            Collection::Albums,
            &album.key,
            Collection::Artists,
            &album.artist_key,
        )?;
        album_artist.insert(&album.key, &album.artist_key);
    }

    for track in &dataset.tracks {
        require(
            &albums,
            Collection::Tracks,
            &track.key,
            Collection::Albums,
            &track.album_key,
        )?;
        require(
            &artists,
            Collection::Tracks,
            &track.key,
            Collection::Artists,
            &track.artist_key,
        )?;

        if let Some(&expected) = album_artist.get(track.album_key.as_str())
            && expected != track.artist_key
        {
            return Err(SeedError::ArtistMismatch {
                track: track.key.clone(),
                artist_key: track.artist_key.clone(),
                album_key: track.album_key.clone(),
                album_artist: expected.to_string(),
            });
        }
    }

    for playlist in &dataset.playlists {
        require(
            &users,
            Collection::Playlists,
            &playlist.key,
            Collection::Users,
            &playlist.user_key,
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_dataset_is_consistent() {
        validate(&Dataset::builtin(0)).unwrap();
    }

    #[test]
    fn test_duplicate_track_key() {
        let mut dataset = Dataset::builtin(0);
        let copy = dataset.tracks[0].clone();
        dataset.tracks.push(copy);

        assert_eq!(
            validate(&dataset),
            Err(SeedError::DuplicateKey {
                collection: Collection::Tracks,
                key: "t1".to_string(),
            })
        );
    }

    #[test]
    fn test_album_with_unknown_artist() {
        let mut dataset = Dataset::builtin(0);
        dataset.albums[0].artist_key = "a99".to_string();

        let err = validate(&dataset).unwrap_err();
        assert_eq!(
            err,
            SeedError::DanglingReference {
                collection: Collection::Albums,
                key: "al1".to_string(),
                target: Collection::Artists,
                missing: "a99".to_string(),
            }
        );
        assert!(err.to_string().contains("a99"));
    }

    #[test]
    fn test_track_with_unknown_album() {
        let mut dataset = Dataset::builtin(0);
        dataset.tracks[4].album_key = "al404".to_string();

        assert!(matches!(
            validate(&dataset),
            Err(SeedError::DanglingReference {
                target: Collection::Albums,
                ..
            })
        ));
    }

    #[test]
    fn test_track_artist_must_match_album_artist() {
        let mut dataset = Dataset::builtin(0);
        // t5 is on al3, which belongs to a2
        let track = dataset.tracks.iter_mut().find(|t| t.key == "t5").unwrap();
        track.artist_key = "a1".to_string();

        assert_eq!(
            validate(&dataset),
            Err(SeedError::ArtistMismatch {
                track: "t5".to_string(),
                artist_key: "a1".to_string(),
                album_key: "al3".to_string(),
                album_artist: "a2".to_string(),
            })
        );
    }

    #[test]
    fn test_playlist_with_unknown_user() {
        let mut dataset = Dataset::builtin(0);
        dataset.playlists[2].user_key = "nobody".to_string();

        assert!(matches!(
            validate(&dataset),
            Err(SeedError::DanglingReference {
                collection: Collection::Playlists,
                target: Collection::Users,
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_track_genre_is_not_an_error() {
        let mut dataset = Dataset::builtin(0);
        dataset.tracks[0].genres.push("lattin".to_string());

        assert!(validate(&dataset).is_ok());
    }
}
