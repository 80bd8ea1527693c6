use crate::collections::GENRE_KEYS;

const DAY_MS: i64 = 86_400_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistSeed {
    pub key: String,
    pub name: String,
    pub country: String,
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumSeed {
    pub key: String,
    pub title: String,
    pub year: i32,
    pub artist_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSeed {
    pub key: String,
    pub title: String,
    /// Duration in seconds
    pub duration: i32,
    pub album_key: String,
    pub artist_key: String,
    pub genres: Vec<String>,
    pub plays: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSeed {
    pub key: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSeed {
    pub key: String,
    pub title: String,
    pub user_key: String,
    /// Epoch milliseconds
    pub created_at: i64,
}

/// Everything a seed run writes, except the edges, which are derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    /// The genre enumeration; track genres outside it get no genre edge
    pub genres: Vec<String>,
    pub artists: Vec<ArtistSeed>,
    pub albums: Vec<AlbumSeed>,
    pub tracks: Vec<TrackSeed>,
    pub users: Vec<UserSeed>,
    pub playlists: Vec<PlaylistSeed>,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Dataset {
    /// The fixed catalog. Playlist creation dates are relative to `now_ms`.
    pub fn builtin(now_ms: i64) -> Self {
        Self {
            genres: strings(&GENRE_KEYS),
            artists: ARTISTS
                .iter()
                .map(|&(key, name, country, genres)| ArtistSeed {
                    key: key.to_string(),
                    name: name.to_string(),
                    country: country.to_string(),
                    genres: strings(genres),
                })
                .collect(),
            albums: ALBUMS
                .iter()
                .map(|&(key, title, year, artist_key)| AlbumSeed {
                    key: key.to_string(),
                    title: title.to_string(),
                    year,
                    artist_key: artist_key.to_string(),
                })
                .collect(),
            tracks: TRACKS
                .iter()
                .map(
                    |&(key, title, duration, album_key, artist_key, genres, plays)| TrackSeed {
                        key: key.to_string(),
                        title: title.to_string(),
                        duration,
                        album_key: album_key.to_string(),
                        artist_key: artist_key.to_string(),
                        genres: strings(genres),
                        plays,
                    },
                )
                .collect(),
            users: USERS
                .iter()
                .map(|&(key, name, email)| UserSeed {
                    key: key.to_string(),
                    name: name.to_string(),
                    email: email.to_string(),
                })
                .collect(),
            playlists: PLAYLISTS
                .iter()
                .map(|&(key, title, user_key, days_ago)| PlaylistSeed {
                    key: key.to_string(),
                    title: title.to_string(),
                    user_key: user_key.to_string(),
                    created_at: now_ms - DAY_MS * days_ago,
                })
                .collect(),
        }
    }
}

// key, name, country, genres
const ARTISTS: &[(&str, &str, &str, &[&str])] = &[
    ("a1", "Luna Rivera", "PE", &["latin", "pop"]),
    ("a2", "The Night Owls", "US", &["rock"]),
    ("a3", "Blue Canvas Trio", "UK", &["jazz"]),
    ("a4", "Synthline", "DE", &["electronic"]),
    ("a5", "Orquesta Andina", "PE", &["classical", "latin"]),
    ("a6", "Indigo Waves", "AR", &["pop", "electronic"]),
    ("a7", "Cedro & Cuerdas", "PE", &["classical"]),
    ("a8", "Ruta 34", "CL", &["rock", "latin"]),
    ("a9", "Mar de Fondo", "UY", &["rock", "latin"]),
    ("a10", "Solar Echoes", "MX", &["electronic", "pop"]),
    ("a11", "Café Meridian", "CO", &["jazz", "latin"]),
    ("a12", "Luz de Cámara", "ES", &["pop"]),
    ("a13", "Cuarteto del Sur", "PE", &["classical", "latin"]),
    ("a14", "Bosque Urbano", "BR", &["rock", "pop"]),
    ("a15", "Línea de Fuego", "MX", &["rock"]),
    ("a16", "Nube Rosa", "AR", &["pop", "latin"]),
    ("a17", "Orbit Ensemble", "CA", &["jazz", "electronic"]),
    ("a18", "Sierra Brava", "PE", &["latin"]),
    ("a19", "Puente Gris", "CL", &["rock", "jazz"]),
    ("a20", "Nocturna", "ES", &["electronic"]),
    ("a21", "Bruma Quartet", "IT", &["classical"]),
];

// key, title, year, artist
const ALBUMS: &[(&str, &str, i32, &str)] = &[
    ("al1", "Amanecer", 2021, "a1"),
    ("al2", "Vértigo", 2023, "a1"),
    ("al3", "Moonlight Run", 2020, "a2"),
    ("al4", "Static Roads", 2022, "a2"),
    ("al5", "Azure Notes", 2019, "a3"),
    ("al6", "Late Café", 2021, "a3"),
    ("al7", "Neon Fields", 2022, "a4"),
    ("al8", "Pulse Driver", 2023, "a4"),
    ("al9", "Suite Andina", 2018, "a5"),
    ("al10", "Cuerdas del Sur", 2022, "a7"),
    ("al11", "Río Eléctrico", 2024, "a6"),
    ("al12", "Kilómetro 34", 2021, "a8"),
    ("al13", "Luz Marina", 2020, "a9"),
    ("al14", "Cruce de Vías", 2022, "a9"),
    ("al15", "Orbits", 2021, "a10"),
    ("al16", "Neón Solar", 2024, "a10"),
    ("al17", "Medianoche en Bogotá", 2019, "a11"),
    ("al18", "Café Largo", 2022, "a11"),
    ("al19", "Plano Secuencia", 2023, "a12"),
    ("al20", "Flash", 2021, "a12"),
    ("al21", "Suite del Sur", 2020, "a13"),
    ("al22", "Andes Chamber", 2023, "a13"),
    ("al23", "Ciudad Verde", 2022, "a14"),
    ("al24", "Horizonte", 2021, "a16"),
    ("al25", "Noches Claras", 2023, "a20"),
];

// key, title, duration (s), album, artist, genres, plays
#[rustfmt::skip]
const TRACKS: &[(&str, &str, i32, &str, &str, &[&str], i64)] = &[
    ("t1", "Intro Amanecer", 120, "al1", "a1", &["latin", "pop"], 351),
    ("t2", "Sol de Octubre", 214, "al1", "a1", &["latin", "pop"], 980),
    ("t3", "Vértigo I", 205, "al2", "a1", &["pop"], 640),
    ("t4", "Vértigo II", 230, "al2", "a1", &["pop"], 712),
    ("t5", "The Run", 198, "al3", "a2", &["rock"], 845),
    ("t6", "Night Curve", 242, "al3", "a2", &["rock"], 523),
    ("t7", "Static Road", 210, "al4", "a2", &["rock"], 667),
    ("t8", "Echo Signs", 225, "al4", "a2", &["rock"], 590),
    ("t9", "Azure Theme", 256, "al5", "a3", &["jazz"], 432),
    ("t10", "Smoky Room", 201, "al5", "a3", &["jazz"], 350),
    ("t11", "Closing Time", 220, "al6", "a3", &["jazz"], 501),
    ("t12", "Blue Streets", 235, "al6", "a3", &["jazz"], 488),
    ("t13", "Neon Gate", 210, "al7", "a4", &["electronic"], 910),
    ("t14", "Field Trip", 199, "al7", "a4", &["electronic"], 880),
    ("t15", "Driver 1", 205, "al8", "a4", &["electronic"], 720),
    ("t16", "Driver 2", 218, "al8", "a4", &["electronic"], 612),
    ("t17", "Obertura", 180, "al9", "a5", &["classical", "latin"], 300),
    ("t18", "Cueca en Re", 210, "al9", "a5", &["classical", "latin"], 420),
    ("t19", "Cuerdas I", 240, "al10", "a7", &["classical"], 520),
    ("t20", "Cuerdas II", 260, "al10", "a7", &["classical"], 510),
    ("t21", "Río I", 200, "al11", "a6", &["pop", "electronic"], 610),
    ("t22", "Río II", 212, "al11", "a6", &["pop", "electronic"], 745),
    ("t23", "Ruta", 190, "al12", "a8", &["rock", "latin"], 430),
    ("t24", "Kilómetro", 205, "al12", "a8", &["rock", "latin"], 455),
    ("t25", "Brisa", 185, "al1", "a1", &["latin"], 260),
    ("t26", "Medianoche", 210, "al3", "a2", &["rock"], 470),
    ("t27", "Café Tarde", 215, "al6", "a3", &["jazz"], 390),
    ("t28", "Neon Sky", 205, "al7", "a4", &["electronic"], 510),
    ("t29", "Suite I", 240, "al9", "a5", &["classical"], 330),
    ("t30", "Suite II", 255, "al9", "a5", &["classical"], 345),
    ("t31", "Arpegio", 222, "al10", "a7", &["classical"], 380),
    ("t32", "Marea", 210, "al11", "a6", &["pop"], 560),
    ("t33", "Asfalto", 208, "al12", "a8", &["rock"], 495),
    ("t34", "Norte", 206, "al12", "a8", &["rock", "latin"], 505),
    ("t35", "Luciérnagas", 204, "al2", "a1", &["pop"], 455),
    ("t36", "Sombras", 202, "al4", "a2", &["rock"], 420),
    ("t37", "Turno Noche", 213, "al3", "a2", &["rock"], 399),
    ("t38", "Chispa", 198, "al8", "a4", &["electronic"], 488),
    ("t39", "Zamba Luz", 232, "al9", "a5", &["latin"], 310),
    ("t40", "Cuerda Final", 245, "al10", "a7", &["classical"], 390),
    ("t41", "Costa Norte", 210, "al13", "a9", &["rock", "latin"], 410),
    ("t42", "Luz Marina", 200, "al13", "a9", &["latin"], 380),
    ("t43", "Mareas Lentas", 230, "al13", "a9", &["rock", "latin"], 395),
    ("t44", "Puerto Gris", 215, "al13", "a9", &["rock"], 360),
    ("t45", "Calle del Mar", 205, "al13", "a9", &["latin"], 402),
    ("t46", "Cruce de Vías", 220, "al14", "a9", &["rock"], 440),
    ("t47", "Túnel Sur", 208, "al14", "a9", &["rock", "latin"], 370),
    ("t48", "Estación Noche", 212, "al14", "a9", &["rock"], 390),
    ("t49", "Rieles", 199, "al14", "a9", &["rock"], 365),
    ("t50", "Retorno", 225, "al14", "a9", &["latin"], 355),
    ("t51", "Inner Orbit", 204, "al15", "a10", &["electronic", "pop"], 520),
    ("t52", "Solar Drift", 218, "al15", "a10", &["electronic"], 545),
    ("t53", "Echo Sun", 210, "al15", "a10", &["pop", "electronic"], 510),
    ("t54", "Apogee", 230, "al15", "a10", &["electronic"], 498),
    ("t55", "Perigee", 206, "al15", "a10", &["pop"], 470),
    ("t56", "Neón Solar", 216, "al16", "a10", &["electronic", "pop"], 560),
    ("t57", "Radiación", 209, "al16", "a10", &["electronic"], 535),
    ("t58", "Círculo Polar", 222, "al16", "a10", &["electronic"], 505),
    ("t59", "Luz Fractal", 214, "al16", "a10", &["electronic", "pop"], 495),
    ("t60", "Halo", 207, "al16", "a10", &["pop"], 480),
    ("t61", "Medianoche", 232, "al17", "a11", &["jazz", "latin"], 430),
    ("t62", "Plaza Central", 220, "al17", "a11", &["jazz"], 410),
    ("t63", "Montaña Azul", 215, "al17", "a11", &["jazz", "latin"], 405),
    ("t64", "Café Nocturno", 225, "al17", "a11", &["jazz"], 398),
    ("t65", "Lluvia Fina", 210, "al17", "a11", &["latin"], 385),
    ("t66", "Café Largo", 218, "al18", "a11", &["jazz"], 420),
    ("t67", "Taza 3", 204, "al18", "a11", &["jazz"], 400),
    ("t68", "Ruta del Aroma", 226, "al18", "a11", &["jazz", "latin"], 392),
    ("t69", "Vapor", 209, "al18", "a11", &["jazz"], 378),
    ("t70", "Último Sorbo", 212, "al18", "a11", &["latin"], 365),
    ("t71", "Toma 1", 205, "al19", "a12", &["pop"], 430),
    ("t72", "Corte Final", 210, "al19", "a12", &["pop"], 415),
    ("t73", "Luces de Estudio", 208, "al19", "a12", &["pop"], 405),
    ("t74", "Foco Principal", 214, "al19", "a12", &["pop"], 398),
    ("t75", "Crédito Inicial", 202, "al19", "a12", &["pop"], 390),
    ("t76", "Flash", 200, "al20", "a12", &["pop"], 450),
    ("t77", "Obturador", 207, "al20", "a12", &["pop"], 428),
    ("t78", "ISO Alto", 211, "al20", "a12", &["pop"], 412),
    ("t79", "Enfoque", 206, "al20", "a12", &["pop"], 405),
    ("t80", "Exposición", 213, "al20", "a12", &["pop"], 395),
    ("t81", "Preludio del Sur", 240, "al21", "a13", &["classical", "latin"], 360),
    ("t82", "Danza del Valle", 232, "al21", "a13", &["classical", "latin"], 352),
    ("t83", "Interludio Andino", 245, "al21", "a13", &["classical"], 342),
    ("t84", "Camino Largo", 238, "al21", "a13", &["classical"], 338),
    ("t85", "Final en Do", 250, "al21", "a13", &["classical"], 330),
    ("t86", "Altiplano", 236, "al22", "a13", &["classical", "latin"], 355),
    ("t87", "Cuerda Alta", 244, "al22", "a13", &["classical"], 348),
    ("t88", "Puna", 229, "al22", "a13", &["classical", "latin"], 340),
    ("t89", "Sala de Cámara", 241, "al22", "a13", &["classical"], 332),
    ("t90", "Despedida", 247, "al22", "a13", &["classical"], 325),
    ("t91", "Parque Central", 210, "al23", "a14", &["rock", "pop"], 420),
    ("t92", "Semáforo Rojo", 202, "al23", "a14", &["rock"], 395),
    ("t93", "Avenida Nueve", 215, "al23", "a14", &["rock", "latin"], 388),
    ("t94", "Auto Gris", 208, "al23", "a14", &["pop"], 375),
    ("t95", "Luces Bajas", 214, "al23", "a14", &["rock"], 402),
    ("t96", "Bicicleta Azul", 206, "al23", "a14", &["pop"], 365),
    ("t97", "Bosque Urbano", 220, "al23", "a14", &["rock", "pop"], 390),
    ("t98", "Rojo y Verde", 203, "al23", "a14", &["rock"], 372),
    ("t99", "Niebla en la Ciudad", 217, "al23", "a14", &["rock"], 360),
    ("t100", "Callejón", 211, "al23", "a14", &["latin"], 355),
    ("t101", "Líneas de Luz", 205, "al23", "a14", &["pop"], 348),
    ("t102", "Semilla de Asfalto", 219, "al23", "a14", &["rock"], 341),
    ("t103", "Cruce Peatonal", 207, "al23", "a14", &["rock", "pop"], 339),
    ("t104", "Esquina Norte", 213, "al23", "a14", &["rock"], 333),
    ("t105", "Último Bus", 224, "al23", "a14", &["rock", "latin"], 329),
    ("t106", "Cielo Bajo", 230, "al24", "a16", &["pop", "latin"], 410),
    ("t107", "Horizonte", 218, "al24", "a16", &["pop"], 398),
    ("t108", "Bruma de Verano", 225, "al24", "a16", &["latin"], 392),
    ("t109", "Nube Rosa", 212, "al24", "a16", &["pop"], 385),
    ("t110", "Línea del Mar", 216, "al24", "a16", &["latin"], 380),
    ("t111", "Orilla", 209, "al24", "a16", &["pop"], 372),
    ("t112", "Reflejos", 221, "al24", "a16", &["pop", "latin"], 368),
    ("t113", "Puerto Claro", 214, "al24", "a16", &["latin"], 360),
    ("t114", "Marea Alta", 207, "al24", "a16", &["pop"], 355),
    ("t115", "Viento Salado", 219, "al24", "a16", &["latin"], 350),
    ("t116", "Postales", 211, "al24", "a16", &["pop"], 345),
    ("t117", "Tarde Lenta", 223, "al24", "a16", &["pop"], 340),
    ("t118", "Oriente", 205, "al24", "a16", &["latin"], 335),
    ("t119", "Contorno", 217, "al24", "a16", &["pop"], 330),
    ("t120", "Azul Profundo", 228, "al24", "a16", &["pop", "latin"], 325),
    ("t121", "Noches Claras", 210, "al25", "a20", &["electronic"], 430),
    ("t122", "Pulsos", 204, "al25", "a20", &["electronic"], 420),
    ("t123", "Cielo Neón", 218, "al25", "a20", &["electronic"], 412),
    ("t124", "Luz Blanca", 213, "al25", "a20", &["electronic", "pop"], 408),
    ("t125", "Ventana Azul", 207, "al25", "a20", &["electronic"], 402),
    ("t126", "Cables", 220, "al25", "a20", &["electronic"], 398),
    ("t127", "Parpadeo", 202, "al25", "a20", &["electronic"], 392),
    ("t128", "Circuito", 215, "al25", "a20", &["electronic"], 387),
    ("t129", "Techo Bajo", 209, "al25", "a20", &["electronic"], 382),
    ("t130", "Filtro", 216, "al25", "a20", &["electronic", "pop"], 377),
    ("t131", "Anochecer", 222, "al25", "a20", &["electronic"], 371),
    ("t132", "Piso 14", 211, "al25", "a20", &["electronic"], 366),
    ("t133", "Sombras LED", 219, "al25", "a20", &["electronic"], 360),
    ("t134", "Estática", 206, "al25", "a20", &["electronic"], 355),
    ("t135", "Última Luz", 224, "al25", "a20", &["electronic"], 350),
    ("t136", "Noche en Ruta", 212, "al12", "a8", &["rock", "latin"], 345),
    ("t137", "Río III", 208, "al11", "a6", &["pop", "electronic"], 360),
    ("t138", "Suite III", 260, "al9", "a5", &["classical"], 340),
    ("t139", "Campo Abierto", 234, "al21", "a13", &["classical", "latin"], 330),
    ("t140", "Neón Andino", 218, "al7", "a4", &["electronic"], 355),];

// key, name, email
const USERS: &[(&str, &str, &str)] = &[
    ("u1", "Ana", "ana@example.com"),
    ("u2", "Luis", "luis@example.com"),
    ("u3", "Sofía", "sofia@example.com"),
    ("u4", "Diego", "diego@example.com"),
    ("u5", "Mia", "mia@example.com"),
];

// key, title, owner, created this many days before the seed run
const PLAYLISTS: &[(&str, &str, &str, i64)] = &[
    ("p1", "Mañanas Pop", "u1", 5),
    ("p2", "Jazz Café", "u2", 3),
    ("p3", "Electro Run", "u3", 10),
    ("p4", "Clásicos PE", "u4", 20),
    ("p5", "Rock Ruta", "u5", 1),
    ("p6", "Focus Jazz", "u1", 2),
    ("p7", "Relax Andina", "u2", 7),
    ("p8", "Top Electrónica", "u3", 4),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sizes() {
        let dataset = Dataset::builtin(0);
        assert_eq!(dataset.genres.len(), 6);
        assert_eq!(dataset.artists.len(), 21);
        assert_eq!(dataset.albums.len(), 25);
        assert_eq!(dataset.tracks.len(), 140);
        assert_eq!(dataset.users.len(), 5);
        assert_eq!(dataset.playlists.len(), 8);
    }

    #[test]
    fn test_builtin_playlist_dates_are_relative() {
        let now = 1_700_000_000_000;
        let dataset = Dataset::builtin(now);
        let p5 = dataset.playlists.iter().find(|p| p.key == "p5").unwrap();
        assert_eq!(p5.created_at, now - DAY_MS);
        assert!(dataset.playlists.iter().all(|p| p.created_at < now));
    }

    #[test]
    fn test_builtin_album_al3() {
        let dataset = Dataset::builtin(0);
        let tracks: Vec<_> = dataset
            .tracks
            .iter()
            .filter(|t| t.album_key == "al3")
            .collect();
        assert_eq!(tracks.len(), 4);
        assert!(tracks.iter().all(|t| t.duration > 0 && t.plays > 0));
    }
}
