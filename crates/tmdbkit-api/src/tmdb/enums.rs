//! Wire enums shared by the TMDb models.

crate::wire_enum! {
    /// Resource kind carried by `media_type`.
    pub enum MediaType {
        /// Not present on the wire.
        Unknown => null,
        /// Feature film.
        Movie => "movie",
        /// TV series.
        Tv => "tv",
        /// Cast or crew member.
        Person => "person",
        /// Movie collection.
        Collection => "collection",
        /// Single TV episode.
        TvEpisode => "tv_episode",
        /// Single TV season.
        TvSeason => "tv_season",
    }
}

crate::wire_enum! {
    /// Person gender, sent as an integer.
    pub enum Gender as numeric {
        /// Not set.
        Unknown = 0,
        /// Female.
        Female = 1,
        /// Male.
        Male = 2,
        /// Non-binary.
        NonBinary = 3,
    }
}

crate::wire_enum! {
    /// Change-log item action, carried by `action`.
    pub enum ChangeAction {
        /// Not present on the wire.
        Unknown => null,
        /// A value was added to a list.
        Added => "added",
        /// The resource was created.
        Created => "created",
        /// A value was replaced.
        Updated => "updated",
        /// A value was removed from a list.
        Deleted => "deleted",
        /// The resource was removed.
        Destroyed => "destroyed",
    }
}

crate::wire_enum! {
    /// Credit kind carried by `credit_type`.
    pub enum CreditType {
        /// Not present on the wire.
        Unknown => null,
        /// Acting credit.
        Cast => "cast",
        /// Production credit.
        Crew => "crew",
    }
}

crate::wire_enum! {
    /// Movie production status.
    pub enum MovieStatus {
        /// Not present on the wire, or a status added after this release.
        Unknown => null,
        /// Rumored.
        Rumored => "Rumored",
        /// Planned.
        Planned => "Planned",
        /// In production.
        InProduction => "In Production",
        /// In post production.
        PostProduction => "Post Production",
        /// Released.
        Released => "Released",
        /// Canceled.
        Canceled => "Canceled",
    }
}

crate::wire_enum! {
    /// Image kind of a tagged image.
    pub enum ImageType {
        /// Not present on the wire, or a kind added after this release.
        Unknown => null,
        /// Backdrop.
        Backdrop => "backdrop",
        /// Poster.
        Poster => "poster",
        /// Person profile picture.
        Profile => "profile",
        /// Episode still.
        Still => "still",
        /// Logo.
        Logo => "logo",
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::convert::{WireEnum, code_for, string_for, value_for, value_for_code};

    fn assert_round_trip<T: WireEnum>() {
        for member in T::MEMBERS {
            if let Some(wire) = string_for(member.value) {
                assert_eq!(value_for::<T>(wire), Some(member.value), "{}::{}", T::NAME, member.symbol);
            }
        }
    }

    #[test]
    fn test_every_enum_round_trips() {
        // Arrange & Act & Assert
        assert_round_trip::<MediaType>();
        assert_round_trip::<Gender>();
        assert_round_trip::<ChangeAction>();
        assert_round_trip::<CreditType>();
        assert_round_trip::<MovieStatus>();
        assert_round_trip::<ImageType>();
    }

    #[test]
    fn test_media_type_wire_names() {
        // Arrange & Act & Assert
        assert_eq!(string_for(MediaType::TvEpisode), Some("tv_episode"));
        assert_eq!(value_for::<MediaType>("TV"), Some(MediaType::Tv));
        assert_eq!(string_for(MediaType::Unknown), None);
        assert_eq!(MediaType::default(), MediaType::Unknown);
    }

    #[test]
    fn test_gender_travels_as_code() {
        // Arrange & Act
        let json = serde_json::to_string(&Gender::NonBinary).unwrap();
        let parsed: Gender = serde_json::from_str("1").unwrap();

        // Assert
        assert_eq!(json, "3");
        assert_eq!(parsed, Gender::Female);
        assert_eq!(code_for(Gender::Unknown), 0);
        assert_eq!(value_for_code::<Gender>(2), Some(Gender::Male));
    }

    #[test]
    fn test_movie_status_with_spaces() {
        // Arrange & Act
        let status: MovieStatus = serde_json::from_str(r#""post production""#).unwrap();

        // Assert
        assert_eq!(status, MovieStatus::PostProduction);
        assert_eq!(status.to_string(), "Post Production");
    }
}
