//! Test vectors from the FIDO U2F Raw Message Formats document, plus a small attestation
//! certificate chain for exercising trust stores. Binary values are lowercase hex.

/// Counter of the authentication response vector
pub const COUNTER_VALUE: u32 = 1;
/// Account used throughout the vectors
pub const ACCOUNT_NAME: &str = "test@example.com";
/// Origin of the browser
pub const ORIGIN: &str = "http://example.com";
/// App id of the registration vector
pub const APP_ID_ENROLL: &str = "http://example.com";
/// App id of the authentication vector
pub const APP_ID_SIGN: &str = "https://gstatic.com/securitykey/a/example.com";
/// Websafe base64 challenge of the registration vector
pub const SERVER_CHALLENGE_ENROLL_BASE64: &str = "vqrS6WXDe1JUs5_c3i4-LkKIHRr-3XVb3azuA5TifHo";
/// Websafe base64 challenge of the authentication vector
pub const SERVER_CHALLENGE_SIGN_BASE64: &str = "opsXqUifDriAAmWclinfbS0e-USY0CgyJHe_Otd7z8o";
/// Channel id of the browser as a JSON web key
pub const CHANNEL_ID_JSON: &str = r#"{"kty":"EC","crv":"P-256","x":"HzQwlfXX7Q4S5MtCCnZUNBw3RMzPO9tOyWjBqRl4tJ8","y":"XVguGFLIZx1fXg3wNqfdbn75hi4-_7-BxhMljw42Ht4"}"#;
/// Client data of the registration vector
pub const BROWSER_DATA_ENROLL: &str = r#"{"typ":"navigator.id.finishEnrollment","challenge":"vqrS6WXDe1JUs5_c3i4-LkKIHRr-3XVb3azuA5TifHo","cid_pubkey":{"kty":"EC","crv":"P-256","x":"HzQwlfXX7Q4S5MtCCnZUNBw3RMzPO9tOyWjBqRl4tJ8","y":"XVguGFLIZx1fXg3wNqfdbn75hi4-_7-BxhMljw42Ht4"},"origin":"http://example.com"}"#;
/// Client data of the authentication vector
pub const BROWSER_DATA_SIGN: &str = r#"{"typ":"navigator.id.getAssertion","challenge":"opsXqUifDriAAmWclinfbS0e-USY0CgyJHe_Otd7z8o","cid_pubkey":{"kty":"EC","crv":"P-256","x":"HzQwlfXX7Q4S5MtCCnZUNBw3RMzPO9tOyWjBqRl4tJ8","y":"XVguGFLIZx1fXg3wNqfdbn75hi4-_7-BxhMljw42Ht4"},"origin":"http://example.com"}"#;

/// SHA-256 of [`APP_ID_ENROLL`]
pub const APP_ID_ENROLL_SHA256_HEX: &str = "f0e6a6a97042a4f1f1c87f5f7d44315b2d852c2df5c7991cc66241bf7072d1c4";

/// SHA-256 of [`APP_ID_SIGN`]
pub const APP_ID_SIGN_SHA256_HEX: &str = "4b0be934baebb5d12d26011b69227fa5e86df94e7d94aa2949a89f2d493992ca";

/// SHA-256 of [`BROWSER_DATA_ENROLL`]
pub const BROWSER_DATA_ENROLL_SHA256_HEX: &str = "4142d21c00d94ffb9d504ada8f99b721f4b191ae4e37ca0140f696b6983cfacb";

/// SHA-256 of [`BROWSER_DATA_SIGN`]
pub const BROWSER_DATA_SIGN_SHA256_HEX: &str = "ccd6ee2e47baef244d49a222db496bad0ef5b6f93aa7cc4d30c4821b3b9dbc57";

/// Attestation certificate of the registration vector
pub const VENDOR_CERTIFICATE_HEX: &str = concat!(
    "3082013c3081e4a003020102020a47901280001155957352300a06082a8648ce",
    "3d0403023017311530130603550403130c476e756262792050696c6f74301e17",
    "0d3132303831343138323933325a170d3133303831343138323933325a303131",
    "2f302d0603550403132650696c6f74476e756262792d302e342e312d34373930",
    "313238303030313135353935373335323059301306072a8648ce3d020106082a",
    "8648ce3d030107034200048d617e65c9508e64bcc5673ac82a6799da3c144668",
    "2c258c463fffdf58dfd2fa3e6c378b53d795c4a4dffb4199edd7862f23abaf02",
    "03b4b8911ba0569994e101300a06082a8648ce3d0403020347003044022060cd",
    "b6061e9c22262d1aac1d96d8c70829b2366531dda268832cb836bcd30dfa0220",
    "631b1459f09e6330055722c8d89b7f48883b9089b88d60d1d9795902b30410df",
);

/// Private scalar matching [`VENDOR_CERTIFICATE_HEX`]
pub const VENDOR_PRIVATE_KEY_HEX: &str = "f3fccc0d00d8031954f90864d43c247f4bf5f0665c6b50cc17749a27d1cf7664";

/// Key handle shared by both vectors
pub const KEY_HANDLE_HEX: &str = concat!(
    "2a552dfdb7477ed65fd84133f86196010b2215b57da75d315b7b9e8fe2e3925a",
    "6019551bab61d16591659cbaf00b4950f7abfe6660e2e006f76868b772d70c25",
);

/// User public key created by the registration vector
pub const USER_PUBLIC_KEY_ENROLL_HEX: &str = concat!(
    "04b174bc49c7ca254b70d2e5c207cee9cf174820ebd77ea3c65508c26da51b65",
    "7c1cc6b952f8621697936482da0a6d3d3826a59095daf6cd7c03e2e60385d2f6",
    "d9",
);

/// Private scalar matching [`USER_PUBLIC_KEY_ENROLL_HEX`]
pub const USER_PRIVATE_KEY_ENROLL_HEX: &str = "9a9684b127c5e3a706d618c86401c7cf6fd827fd0bc18d24b0eb842e36d16df1";

/// User public key which signed the authentication vector
pub const USER_PUBLIC_KEY_SIGN_HEX: &str = concat!(
    "04d368f1b665bade3c33a20f1e429c7750d5033660c019119d29aa4ba7abc04a",
    "a7c80a46bbe11ca8cb5674d74f31f8a903f6bad105fb6ab74aefef4db8b0025e",
    "1d",
);

/// Private scalar matching [`USER_PUBLIC_KEY_SIGN_HEX`]
pub const USER_PRIVATE_KEY_SIGN_HEX: &str = "ffa1e110dde5a2f8d93c4df71e2d4337b7bf5ddb60c75dc2b6b81433b54dd3c0";

/// Raw registration request
pub const REGISTRATION_REQUEST_DATA_HEX: &str = concat!(
    "4142d21c00d94ffb9d504ada8f99b721f4b191ae4e37ca0140f696b6983cfacb",
    "f0e6a6a97042a4f1f1c87f5f7d44315b2d852c2df5c7991cc66241bf7072d1c4",
);

/// Raw registration response
pub const REGISTRATION_RESPONSE_DATA_HEX: &str = concat!(
    "0504b174bc49c7ca254b70d2e5c207cee9cf174820ebd77ea3c65508c26da51b",
    "657c1cc6b952f8621697936482da0a6d3d3826a59095daf6cd7c03e2e60385d2",
    "f6d9402a552dfdb7477ed65fd84133f86196010b2215b57da75d315b7b9e8fe2",
    "e3925a6019551bab61d16591659cbaf00b4950f7abfe6660e2e006f76868b772",
    "d70c253082013c3081e4a003020102020a47901280001155957352300a06082a",
    "8648ce3d0403023017311530130603550403130c476e756262792050696c6f74",
    "301e170d3132303831343138323933325a170d3133303831343138323933325a",
    "3031312f302d0603550403132650696c6f74476e756262792d302e342e312d34",
    "373930313238303030313135353935373335323059301306072a8648ce3d0201",
    "06082a8648ce3d030107034200048d617e65c9508e64bcc5673ac82a6799da3c",
    "1446682c258c463fffdf58dfd2fa3e6c378b53d795c4a4dffb4199edd7862f23",
    "abaf0203b4b8911ba0569994e101300a06082a8648ce3d040302034700304402",
    "2060cdb6061e9c22262d1aac1d96d8c70829b2366531dda268832cb836bcd30d",
    "fa0220631b1459f09e6330055722c8d89b7f48883b9089b88d60d1d9795902b3",
    "0410df304502201471899bcc3987e62e8202c9b39c33c19033f7340352dba80f",
    "cab017db9230e402210082677d673d891933ade6f617e5dbde2e247e70423fd5",
    "ad7804a6d3d3961ef871",
);

/// Raw authentication request with the enforce user presence control byte
pub const SIGN_REQUEST_DATA_HEX: &str = concat!(
    "03ccd6ee2e47baef244d49a222db496bad0ef5b6f93aa7cc4d30c4821b3b9dbc",
    "574b0be934baebb5d12d26011b69227fa5e86df94e7d94aa2949a89f2d493992",
    "ca402a552dfdb7477ed65fd84133f86196010b2215b57da75d315b7b9e8fe2e3",
    "925a6019551bab61d16591659cbaf00b4950f7abfe6660e2e006f76868b772d7",
    "0c25",
);

/// Raw authentication response
pub const SIGN_RESPONSE_DATA_HEX: &str = concat!(
    "0100000001304402204b5f0cd17534cedd8c34ee09570ef542a353df4436030c",
    "e43d406de870b847780220267bb998fac9b7266eb60e7cb0b5eabdfd5ba9614f",
    "53c7b22272ec10047a923f",
);

/// Bytes signed by the attestation key in the registration vector
pub const EXPECTED_REGISTER_SIGNED_BYTES_HEX: &str = concat!(
    "00f0e6a6a97042a4f1f1c87f5f7d44315b2d852c2df5c7991cc66241bf7072d1",
    "c44142d21c00d94ffb9d504ada8f99b721f4b191ae4e37ca0140f696b6983cfa",
    "cb2a552dfdb7477ed65fd84133f86196010b2215b57da75d315b7b9e8fe2e392",
    "5a6019551bab61d16591659cbaf00b4950f7abfe6660e2e006f76868b772d70c",
    "2504b174bc49c7ca254b70d2e5c207cee9cf174820ebd77ea3c65508c26da51b",
    "657c1cc6b952f8621697936482da0a6d3d3826a59095daf6cd7c03e2e60385d2",
    "f6d9",
);

/// Bytes signed by the user key in the authentication vector
pub const EXPECTED_AUTHENTICATE_SIGNED_BYTES_HEX: &str = concat!(
    "4b0be934baebb5d12d26011b69227fa5e86df94e7d94aa2949a89f2d493992ca",
    "0100000001ccd6ee2e47baef244d49a222db496bad0ef5b6f93aa7cc4d30c482",
    "1b3b9dbc57",
);

/// Attestation signature of the registration vector
pub const SIGNATURE_REGISTER_HEX: &str = concat!(
    "304502201471899bcc3987e62e8202c9b39c33c19033f7340352dba80fcab017",
    "db9230e402210082677d673d891933ade6f617e5dbde2e247e70423fd5ad7804",
    "a6d3d3961ef871",
);

/// User signature of the authentication vector
pub const SIGNATURE_AUTHENTICATE_HEX: &str = concat!(
    "304402204b5f0cd17534cedd8c34ee09570ef542a353df4436030ce43d406de8",
    "70b847780220267bb998fac9b7266eb60e7cb0b5eabdfd5ba9614f53c7b22272",
    "ec10047a923f",
);

// Attestation chain

/// Self signed P-256 root certificate
pub const TEST_ATTESTATION_ROOT_HEX: &str = concat!(
    "3082014b3081f2a003020102020101300a06082a8648ce3d0403023024312230",
    "2006035504030c195532462054657374204174746573746174696f6e20526f6f",
    "743020170d3230303130313030303030305a180f323037303031303130303030",
    "30305a30243122302006035504030c1955324620546573742041747465737461",
    "74696f6e20526f6f743059301306072a8648ce3d020106082a8648ce3d030107",
    "03420004a0b2e23c18224516e826982da88d33b9a5f388b02d84caa2629ea078",
    "c570630561b5bcdc57bafa90ac0190bfbf9a39efe8833d6ef4d57274f638d987",
    "7bb7f888a3133011300f0603551d130101ff040530030101ff300a06082a8648",
    "ce3d0403020348003045022100e3562a8cc2b861dada76bc49444846254ab39e",
    "5b2c9f3684bd7ab5348f010bbe022021e67392668facde12ae04faee67a7051b",
    "3718afdab454d0c43a7ed69ca7079f",
);

/// Attestation certificate issued by [`TEST_ATTESTATION_ROOT_HEX`]
pub const TEST_ATTESTATION_CERTIFICATE_HEX: &str = concat!(
    "3082012b3081d2a003020102020102300a06082a8648ce3d0403023024312230",
    "2006035504030c195532462054657374204174746573746174696f6e20526f6f",
    "743020170d3230303130313030303030305a180f323037303031303130303030",
    "30305a30193117301506035504030c0e553246205465737420546f6b656e3059",
    "301306072a8648ce3d020106082a8648ce3d030107034200045578322b0b98bc",
    "f8cda2fcd1ccf8ad6bafc18ea42c15d0ef9a355b754e082f41fe28bf2c50457f",
    "12b47c3e0828ed6f22ee4d41b8db79d33c04c151f4d0879adb300a06082a8648",
    "ce3d0403020348003045022100ba8c6f5563120afebc7809895600c843ee9f95",
    "89f59b7e742e29ede3c27e666f02202ca79d7a3b5da3c47e1c1ffb15819797c8",
    "282ab27e0be15519b9f84896aa7c1b",
);

/// Private scalar matching [`TEST_ATTESTATION_CERTIFICATE_HEX`]
pub const TEST_ATTESTATION_PRIVATE_KEY_HEX: &str = "eb586669cbb4b733533517686b52912a3470f0021a58f09105fb1a9190a97363";

/// Self signed RSA-2048 root certificate, sha256WithRSAEncryption
pub const TEST_RSA_ROOT_HEX: &str = concat!(
    "3082031930820201a00302010202140e928adb5f02ebab18269d919ef9294d93",
    "b03346300d06092a864886f70d01010b0500301c311a301806035504030c1155",
    "324620525341205465737420526f6f74301e170d323631303136303134363131",
    "5a170d3436313031313031343631315a301c311a301806035504030c11553246",
    "20525341205465737420526f6f7430820122300d06092a864886f70d01010105",
    "000382010f003082010a02820101009591b62ef371809a1ac75c781efc9f2e3c",
    "0afa12000d6c9288a590e7e8152dc86a20f0fc23483e1a941e70d7aedb27b1f4",
    "1f3900b3369f6fc83a710cd737b31baf34aa010d2f617eaa986d22c09abb546d",
    "6f9151fbee5e9312dadbc4f53f66e92af33dce7ee69358e91418a7c005f70f75",
    "c2deeeb29794fbf90dca782bde0b8bebf089178fce47c5ea3847a2995fb0abba",
    "0cec53b9c0bd19e9200ea3e6cc1056a1f959021bb60e8a64e0aa879931c1b288",
    "3b6a5ea4809616b50ea67421f7fdeadb80837f8668e07f884e91ceac95a6abbb",
    "6fdb67ecda83ae4427203ae9716cf3820d551cf6166bbe6691865f9f174d9347",
    "da75684eeb45b5facbfd0c745411af0203010001a3533051301d0603551d0e04",
    "160414e4868f963f76a963d375bcd99e689ec4a69256f9301f0603551d230418",
    "30168014e4868f963f76a963d375bcd99e689ec4a69256f9300f0603551d1301",
    "01ff040530030101ff300d06092a864886f70d01010b050003820101005aba50",
    "c6bdf634cec8536fab945bf46a9aa5f5d3596abed6488ac38b3641ff5c686744",
    "37f69442b436784376988ece6f51cc48c6eff67f81a734effe99c69c3c8bffe3",
    "f1bc2d68c9b83d80aba4e6910a0744ca25fa33353358bb79e8fa5ef5bc8f9e12",
    "536d6f69ef0a1d7c3d8a2aaf855f8dbd724d72322bfda9a2b4ed131b7c369ab7",
    "7958c9a36750a7b0f9d306996f6d29c3b2a8c0d5c2f79e858eee7034a43b644d",
    "e1e9e231211918e12d153de556c4e96cb3fd62d3a6fdb5806c8aec4fa1a3b092",
    "83e3438f9878a58110fdc4f194cf50d6acf6bf28d552b4528763519a98cbc7e0",
    "f57f1246e16fa93e93435e4b265dc00a38f5df7267f44f2223373fae8e",
);

/// P-256 attestation certificate issued by [`TEST_RSA_ROOT_HEX`]
pub const TEST_RSA_ISSUED_CERTIFICATE_HEX: &str = concat!(
    "308202333082011ba003020102020107300d06092a864886f70d01010b050030",
    "1c311a301806035504030c1155324620525341205465737420526f6f74301e17",
    "0d3236313031363031343631315a170d3436313031313031343631315a302531",
    "23302106035504030c1a55324620525341204973737565642041747465737461",
    "74696f6e3059301306072a8648ce3d020106082a8648ce3d0301070342000420",
    "90e6738e600b2cb73a2f78e7aa396e20d5ef1f66ea856d1234a704a117aa65b5",
    "761977220e4b47902fb23ef6535cdba3a26450715d5c2eb14f8d953bfe0247a3",
    "423040301d0603551d0e0416041483e996a6ee018f81a3cd2df36a6554a62ff6",
    "88c2301f0603551d23041830168014e4868f963f76a963d375bcd99e689ec4a6",
    "9256f9300d06092a864886f70d01010b050003820101007a8a06b31afc00bceb",
    "307f77c026c93af487345098c5a4605662092a2393e22fc241dd4141f86ba53d",
    "e629a9d2ec2022ea79b393358c256fc77a642efc871b218dd229b85ecc07d63e",
    "340e8566c377d44f47646c12273936a7c90a4788dcff9f327d58763febc96e60",
    "4066a21035fec574ca5cec68488b1406f49b3467f1197934753867b32b6a053b",
    "87527abbbca1438666a49d04c0ab4d90e7ad8e01784faf17074820f48c03b4e4",
    "805dad42c75f2665c7ec4ea1400a91a757083a9ed39927a25062e104c87e50a4",
    "110a38743ad3e250fe8aa1c65d099669a3a660e57f6fe18118b4b9826633919e",
    "5d30f815965e930fc5a669a8cbdb6a5b8bd7604d23535d",
);
