pub use consonants::*;
pub use vowels::*;

mod vowels {
    pub const VOWELS: &str = "\
symbol,height,backness,roundedness
i,close,front,unrounded
y,close,front,rounded
ɨ,close,central,unrounded
ʉ,close,central,rounded
ɯ,close,back,unrounded
u,close,back,rounded
ɪ,near-close,front,unrounded
ʏ,near-close,front,rounded
ʊ,near-close,near-back,rounded
e,close-mid,front,unrounded
ø,close-mid,front,rounded
ɘ,close-mid,central,unrounded
ɵ,close-mid,central,rounded
ɤ,close-mid,back,unrounded
o,close-mid,back,rounded
e̞,mid,front,unrounded
ø̞,mid,front,rounded
ə,mid,central,unrounded
ɵ̞,mid,central,rounded
ɤ̞,mid,back,unrounded
o̞,mid,back,rounded
ɛ,open-mid,front,unrounded
œ,open-mid,front,rounded
ɜ,open-mid,central,unrounded
ɞ,open-mid,central,rounded
ʌ,open-mid,back,unrounded
ɔ,open-mid,back,rounded
æ,near-open,front,unrounded
ɐ,near-open,central,unrounded
a,open,front,unrounded
ɶ,open,front,rounded
ä,open,central,unrounded
ɑ,open,back,unrounded
ɒ,open,back,rounded
ɚ,mid,central,unrounded
ɝ,open-mid,central,unrounded";
}

mod consonants {
    pub const PULMONIC_CONSONANTS: &str = "\
symbol,place,voice,manner
m̥,bilabial,voiceless,nasal
m,bilabial,voiced,nasal
p,bilabial,voiceless,plosive
b,bilabial,voiced,plosive
pɸ,bilabial,voiceless,non-sibilant affricate
pß,bilabial,voiced,non-sibilant affricate
ɸ,bilabial,voiceless,non-sibilant fricative
β,bilabial,voiced,non-sibilant fricative
ⱱ̟,bilabial,voiced,tap/flap
ʙ̥,bilabial,voiceless,trill
ʙ,bilabial,voiced,trill
ɱ̊,labiodental,voiceless,nasal
ɱ,labiodental,voiced,nasal
p̪,labiodental,voiceless,plosive
b̪,labiodental,voiced,plosive
p̪f,labiodental,voiceless,non-sibilant affricate
b̪v,labiodental,voiced,non-sibilant affricate
f,labiodental,voiceless,non-sibilant fricative
v,labiodental,voiced,non-sibilant fricative
ʋ,labiodental,voiced,approximant
ⱱ,labiodental,voiced,tap/flap
n̼,linguolabial,voiced,nasal
t̼,linguolabial,voiceless,plosive
d̼,linguolabial,voiced,plosive
θ̼,linguolabial,voiceless,non-sibilant fricative
ð̼,linguolabial,voiced,non-sibilant fricative
ɾ̼,linguolabial,voiced,tap/flap
t̪θ,dental,voiceless,non-sibilant affricate
d̪ð,dental,voiced,non-sibilant affricate
θ̼,dental,voiceless,non-sibilant fricative
ð̼,dental,voiced,non-sibilant fricative
n̥,alveolar,voiceless,nasal
n,alveolar,voiced,nasal
t,alveolar,voiceless,plosive
d,alveolar,voiced,plosive
ts,alveolar,voiceless,sibilant affricate
dz,alveolar,voiced,sibilant affricate
tɹ̝̊,alveolar,voiceless,non-sibilant affricate
dɹ̝,alveolar,voiced,non-sibilant affricate
s,alveolar,voiceless,sibilant fricative
z,alveolar,voiced,sibilant fricative
θ̠,alveolar,voiceless,non-sibilant fricative
ð̠,alveolar,voiced,non-sibilant fricative
ɹ,alveolar,voiced,approximant
ɾ̥,alveolar,voiceless,tap/flap
ɾ,alveolar,voiced,tap/flap
r̥,alveolar,voiceless,trill
r,alveolar,voiced,trill
tɬ,alveolar,voiceless,affricate lateral
dɮ,alveolar,voiced,affricate lateral
ɬ,alveolar,voiceless,fricative lateral
ɮ,alveolar,voiced,fricative lateral
l,alveolar,voiced,approximant lateral
ɺ̥,alveolar,voiceless,tap/flap lateral
ɺ,alveolar,voiced,tap/flap lateral
t̠ʃ,postalveolar,voiceless,sibilant affricate
d̠ʒ,postalveolar,voiced,sibilant affricate
t̠ɹ̠̊˔,postalveolar,voiceless,non-sibilant affricate
d̠ɹ̠˔,postalveolar,voiced,non-sibilant affricate
ʃ,postalveolar,voiceless,sibilant fricative
ʒ,postalveolar,voiced,sibilant fricative
ɹ̠̊˔,postalveolar,voiceless,non-sibilant fricative
ɹ̠˔,postalveolar,voiced,non-sibilant fricative
ɳ̊,retroflex,voiceless,nasal
ɳ,retroflex,voiced,nasal
ʈ,retroflex,voiceless,plosive
ɖ,retroflex,voiced,plosive
tʂ,retroflex,voiceless,sibilant affricate
dʐ,retroflex,voiced,sibilant affricate
ʂ,retroflex,voiceless,sibilant fricative
ʐ,retroflex,voiced,sibilant fricative
ɻ̊˔,retroflex,voiceless,non-sibilant fricative
ɻ˔,retroflex,voiced,non-sibilant fricative
ɻ,retroflex,voiced,approximant
ɽ̊,retroflex,voiceless,tap/flap
ɽ,retroflex,voiced,tap/flap
ɽ̊r̥,retroflex,voiceless,trill
ɽr,retroflex,voiced,trill
tꞎ,retroflex,voiceless,affricate lateral
ɖ͡ɭ˔,retroflex,voiced,affricate lateral
ꞎ,retroflex,voiceless,fricative lateral
ɭ˔,retroflex,voiced,fricative lateral
ɭ,retroflex,voiced,approximant lateral
ɭ̥̆,retroflex,voiceless,tap/flap lateral
ɭ̆,retroflex,voiced,tap/flap lateral
ɲ̊,palatal,voiceless,nasal
ɲ,palatal,voiced,nasal
c,palatal,voiceless,plosive
ɟ,palatal,voiced,plosive
tɕ,palatal,voiceless,sibilant affricate
dʑ,palatal,voiced,sibilant affricate
cç,palatal,voiceless,non-sibilant affricate
ɟʝ,palatal,voiced,non-sibilant affricate
ɕ,palatal,voiceless,sibilant fricative
ʑ,palatal,voiced,sibilant fricative
ç,palatal,voiceless,non-sibilant fricative
ʝ,palatal,voiced,non-sibilant fricative
j,palatal,voiced,approximant
cʎ̥˔,palatal,voiceless,affricate lateral
ɟʎ̝,palatal,voiced,affricate lateral
ʎ̥˔,palatal,voiceless,fricative lateral
ʎ̝,palatal,voiced,fricative lateral
ʎ,palatal,voiced,approximant lateral
ʎ̆,palatal,voiced,tap/flap lateral
ŋ̊,velar,voiceless,nasal
ŋ,velar,voiced,nasal
k,velar,voiceless,plosive
g,velar,voiced,plosive
kx,velar,voiceless,non-sibilant affricate
ɡɣ,velar,voiced,non-sibilant affricate
x,velar,voiceless,non-sibilant fricative
ɣ,velar,voiced,non-sibilant fricative
ɰ,velar,voiced,approximant
kʟ̝̊,velar,voiceless,affricate lateral
ɡʟ̝,velar,voiced,affricate lateral
ʟ̝̊,velar,voiceless,fricative lateral
ʟ̝̊,velar,voiced,fricative lateral
ʟ,velar,voiced,approximant lateral
ʟ̆,velar,voiced,tap/flap lateral
ɴ̥,uvular,voiceless,nasal
ɴ,uvular,voiced,nasal
q,uvular,voiceless,plosive
ɢ,uvular,voiced,plosive
qχ,uvular,voiceless,non-sibilant affricate
ɢʁ,uvular,voiced,non-sibilant affricate
χ,uvular,voiceless,non-sibilant fricative
ʁ,uvular,voiced,non-sibilant fricative
ɢ̆,uvular,voiced,tap/flap
ʀ̥,uvular,voiceless,trill
ʀ,uvular,voiced,trill
ʟ̠,uvular,voiced,approximant lateral
ʡ,pharyngeal/epiglottal,voiceless,plosive
ʡʜ,pharyngeal/epiglottal,voiceless,non-sibilant affricate
ʡʢ,pharyngeal/epiglottal,voiced,non-sibilant affricate
ħ,pharyngeal/epiglottal,voiceless,non-sibilant fricative
ʕ,pharyngeal/epiglottal,voiced,non-sibilant fricative
ʡ̆,pharyngeal/epiglottal,voiced,tap/flap
ʜ,pharyngeal/epiglottal,voiceless,trill
ʢ,pharyngeal/epiglottal,voiced,trill
ʔ,glottal,voiceless,plosive
ʔh,glottal,voiceless,non-sibilant affricate
h,glottal,voiceless,non-sibilant fricative
ɦ,glottal,voiced,non-sibilant fricative
ʔ̞,glottal,voiced,approximant
ɡ,velar,voiced,plosive
w,labial-velar,voiced,approximant
ʍ,labial-velar,voiceless,non-sibilant fricative
tʃ,postalveolar,voiceless,sibilant affricate
dʒ,postalveolar,voiced,sibilant affricate
θ,dental,voiceless,non-sibilant fricative
ð,dental,voiced,non-sibilant fricative";
}

pub mod english {
    /// Vowel sequences that count as a single nucleus.
    pub const DIPHTHONGS: &str = "eɪ;oʊ;aɪ;ɔɪ;aʊ";

    /// Onset:
    /// PR
    /// FR
    /// Consonant plus j
    /// s[mnfl]
    /// sP(R)
    /// Cw
    pub const ONSET_CLUSTERS: &str = "\
pl;pɹ;bl;bɹ;tɹ;dɹ;kl;kɹ;ɡl;ɡɹ;fl;fɹ;θɹ;ʃɹ
tw;dw;kw;ɡw;θw;sw
sp;st;sk;sm;sn;sf;sl
spl;spɹ;stɹ;skɹ;skw;skl
pj;bj;kj;ɡj;mj;fj;vj;hj;nj;lj;spj;skj";

    pub const FORBIDDEN_ONSETS: &str = "ŋ";

    pub const NORMALIZATION: &str = "g|ɡ;:|ː;'|ˈ;ʧ|tʃ;ʤ|dʒ";

    pub const DICTIONARY: &str = "\
orthography,ipa
hello,hɛˈloʊ
hello,həˈloʊ
world,ˈwɝld
goodbye,ɡʊdˈbaɪ
sanity,ˈsænɪti
apple,ˈæpəl
banana,bəˈnænə
cat,ˈkæt
dog,ˈdɔɡ
dog,ˈdɑɡ
egg,ˈɛɡ
either,ˈiðɚ
either,ˈaɪðɚ
eye,ˈaɪ
idea,aɪˈdiə
into,ˈɪntu
open,ˈoʊpən
pencil,ˈpɛnsəl
string,ˈstɹɪŋ
table,ˈteɪbəl
tomato,təˈmeɪtoʊ
tomato,təˈmɑtoʊ
up,ˈʌp
water,ˈwɔtɚ
water,ˈwɑtɚ
window,ˈwɪndoʊ
yellow,ˈjɛloʊ
zebra,ˈzibɹə";
}

pub const DEFAULT_WORDS: [&str; 4] = ["hello", "world", "goodbye", "sanity"];

pub const DEFAULT_SHAPES: &str = "V=(S)V;CV=(S)CV;VC=(S)VC;CVC=(S)CVC";
