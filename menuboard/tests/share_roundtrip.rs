use menuboard::{
    ctx::{AppContext, Origin},
    model::{DataUri, DietaryTag, MenuConfig, MenuItem},
    share::{DEFAULT_MAX_URL_LEN, Location, StatePort},
};
use menushare::{CompressionInterface, GzipCompressor, ShareCodec, ShareError, token};

fn is_token(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

fn city_deli() -> MenuConfig {
    MenuConfig {
        title: "CITY DELI".into(),
        items: vec![
            MenuItem::new("1", "WRAP", "desc", "$9.75").with_dietary([DietaryTag::Vegetarian]),
        ],
        ..MenuConfig::default()
    }
}

#[test]
fn test_city_deli_scenario() {
    let codec = ShareCodec::new();
    let config = city_deli();

    let token = codec.encode(&config).unwrap();
    assert!(is_token(&token), "token {token} has unsafe characters");

    let decoded: MenuConfig = codec.decode(&token).unwrap().unwrap();
    assert_eq!(decoded, config);
    assert_eq!(
        decoded.items[0].dietary.iter().map(|t| t.code()).collect::<Vec<_>>(),
        ["V"]
    );
}

#[test]
fn test_edge_configurations() {
    let codec = ShareCodec::new();

    let empty = MenuConfig {
        items: vec![],
        logo_url: None,
        featured_image: None,
        featured_item_name: String::new(),
        ..MenuConfig::default()
    };

    let mut unicode = MenuConfig::default();
    unicode.title = "CAFÉ 東京 🍜".into();
    unicode.items[0].name = "Smørrebrød".into();
    unicode.items[0].description = "Rugbrød | Æg | Rejer — «frisk»".into();
    unicode.items[1].price = "¥1,200".into();
    unicode.items[2].is_sold_out = true;

    for config in [empty, unicode] {
        let token = codec.encode(&config).unwrap();
        assert!(is_token(&token));
        assert_eq!(codec.decode::<MenuConfig>(&token).unwrap(), Some(config));
    }
}

#[test]
fn test_embedded_images_survive_byte_for_byte() {
    let codec = ShareCodec::new();
    let mut config = MenuConfig::default();

    let photo: Vec<u8> = (0..300_000u32)
        .map(|i| (i.wrapping_mul(2654435761) >> 13) as u8)
        .collect();
    config.logo_url = Some(DataUri::new("image/png", vec![0, 1, 2, 254, 255]).to_string());
    config.items[0].image_url = Some(DataUri::new("image/jpeg", photo.clone()).to_string());
    config.featured_image = Some(DataUri::new("image/webp", photo[..1000].to_vec()).to_string());

    let token = codec.encode(&config).unwrap();
    let decoded: MenuConfig = codec.decode(&token).unwrap().unwrap();

    let image = DataUri::parse(decoded.items[0].image_url.as_deref().unwrap()).unwrap();
    assert_eq!(image.data, photo);
    assert_eq!(decoded, config);

    // 带图片的链接远超扫码上限
    assert!(token.len() > DEFAULT_MAX_URL_LEN);
}

#[test]
fn test_oversized_board_is_rejected_not_truncated() {
    let codec = ShareCodec::new().with_max_payload(256 * 1024);
    let mut config = MenuConfig::default();
    config.items[0].image_url = Some(DataUri::new("image/png", vec![7; 512 * 1024]).to_string());

    let err = codec.encode(&config).unwrap_err();
    assert!(matches!(err, ShareError::PayloadTooLarge { .. }));
    assert!(err.is_encode_error());
}

#[test]
fn test_web_editor_token() {
    // 网页端生成的令牌省略了可选字段
    let json = r##"{
        "title": "CITY DELI", "subtitle": "",
        "accentColor": "#00aeef", "secondaryColor": "#8dc63f", "backgroundColor": "#ffffff",
        "fontFamily": "sans", "imageTheme": "modern",
        "items": [{
            "id": "1", "name": "WRAP", "description": "desc", "price": "$9.75", "dietary": ["V"]
        }],
        "featuredImage": "", "featuredItemName": ""
    }"##;
    let compressed = GzipCompressor::default().compress(json.as_bytes()).unwrap();
    let token = token::encode_bytes(&compressed);

    let config: MenuConfig = ShareCodec::new().decode(&token).unwrap().unwrap();
    assert_eq!(config.image_theme, "modern");
    assert_eq!(config.items.len(), 1);
    assert!(config.items[0].dietary.contains(&DietaryTag::Vegetarian));
    assert!(config.items[0].image_url.is_none());
}

#[test]
fn test_corrupted_tokens() {
    let codec = ShareCodec::new();
    let token = codec.encode(&city_deli()).unwrap();

    assert!(matches!(
        codec.decode::<MenuConfig>("not-a-valid-token!!!"),
        Err(ShareError::DecodeFailed(_))
    ));
    assert!(codec.decode::<MenuConfig>(&token[..token.len() / 2]).is_err());
    assert!(codec.decode::<MenuConfig>(&format!("{token}%20")).is_err());
    assert_eq!(codec.decode::<MenuConfig>("").unwrap(), None);
}

#[test]
fn test_object_without_items_is_rejected() {
    let json = br#"{"title":"CITY DELI","menu":[]}"#;
    let compressed = GzipCompressor::default().compress(json).unwrap();
    let token = token::encode_bytes(&compressed);

    let err = ShareCodec::new().decode::<MenuConfig>(&token).unwrap_err();
    assert!(matches!(err, ShareError::DecodeFailed(_)));
}

#[tokio::test]
async fn test_share_link_flow() {
    let mut editor = AppContext::new(Location::parse("https://menu.example.com/board"));
    let id = editor.add_item();
    editor.toggle_dietary(&id, DietaryTag::Vegan);

    let link = editor.share("https://menu.example.com/board").await.unwrap();
    assert_eq!(editor.port().href(), link.url());
    assert!(is_token(&link.token));

    let mut viewer = AppContext::new(Location::parse(&link.url()));
    assert_eq!(viewer.hydrate().await, Origin::Shared);
    assert_eq!(viewer.config, editor.config);
    assert_eq!(viewer.port().read().as_deref(), Some(link.token.as_str()));

    let mut plain = AppContext::new(Location::parse("https://menu.example.com/board"));
    assert_eq!(plain.hydrate().await, Origin::Default);
    assert_eq!(plain.config, MenuConfig::default());
}
