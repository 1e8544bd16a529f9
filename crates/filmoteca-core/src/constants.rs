//! Catalog constants: remote table and bucket names, the fixed enumerations
//! the forms draw from, and the metadata API endpoints.

/// Table holding catalog records.
pub const FILMS_TABLE: &str = "films";

/// Table holding the fixed set of homepage banners.
pub const BANNERS_TABLE: &str = "bannersInicio";

/// Stored procedure returning the visits dashboard payload.
pub const VISITS_RPC: &str = "get_visitas_dashboard";

/// Object-store bucket for posters and banners.
pub const MEDIA_BUCKET: &str = "media";

/// Key prefix for poster objects (`covers/{film_id}/{timestamp}.{ext}`).
pub const COVERS_PREFIX: &str = "covers";

/// Key prefix for banner objects (`main/{filename}`).
pub const BANNERS_PREFIX: &str = "main";

/// The pseudo-tab that filters on `cult_film` instead of `film_type`.
pub const CULT_TAB: &str = "Culto";

/// Allowed table page sizes.
pub const PAGE_SIZES: [u32; 3] = [20, 50, 100];

/// Base URL of the third-party movie-metadata API.
pub const METADATA_API_BASE: &str = "https://api.themoviedb.org/3";

/// Image CDN prefix joined with metadata poster paths.
pub const METADATA_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

/// Substituted when a metadata result carries no poster path.
pub const POSTER_PLACEHOLDER_URL: &str =
    "https://placehold.co/500x750/cccccc/333333?text=No+Image";

/// Subtype tags a record may carry; each drives one catalog tab.
pub const FILM_TYPES: [&str; 7] = [
    "Pelicula",
    "Serie",
    "Animacion",
    "Anime",
    "Musical",
    "Documental",
    "Audio",
];

/// Boutique labels selectable for cult editions.
pub const CULT_BRANDS: [&str; 26] = [
    "88 films",
    "Arrow video",
    "Bfi",
    "Blue underground",
    "Code red",
    "Criterion collection",
    "Cualdron",
    "Eureka",
    "Imprint",
    "Indicator",
    "Kino lorber",
    "Mill creek entertainment",
    "Mondo macabro",
    "Mvd visual",
    "Olive films",
    "Redemption",
    "Scorpion releasing",
    "Scream factory",
    "Severin",
    "Shameless",
    "Shout factory",
    "Synapse films",
    "Twilight time",
    "Vestron video",
    "Vinegar syndrome",
    "Warner archive",
];

/// Genre tags for `genres_list`.
pub const GENRES: [&str; 22] = [
    "Accion",
    "Animacion",
    "Aventura",
    "Belica",
    "Biografia",
    "Ciencia ficcion",
    "Comedia",
    "Crimen",
    "Deporte",
    "Documental",
    "Drama",
    "Familiar",
    "Fantasia",
    "Film noir",
    "Historia",
    "Misterio",
    "Musical",
    "Pelicula de tv",
    "Romance",
    "Suspenso",
    "Terror",
    "Western",
];

/// Languages for original/audio/subtitle fields.
pub const LANGUAGES: [&str; 28] = [
    "Ingles",
    "Latino",
    "Castellano",
    "Frances",
    "Aleman",
    "Italiano",
    "Portugues",
    "Japones",
    "Coreano",
    "Ruso",
    "Chino",
    "Arabe",
    "Indu",
    "Rumano",
    "Checo",
    "Bengali",
    "Turco",
    "Persa",
    "Hungaro",
    "Griego",
    "Tailandes",
    "Vietnamita",
    "Polaco",
    "Finlandes",
    "Sueco",
    "Noruego",
    "Danes",
    "Musica",
];
